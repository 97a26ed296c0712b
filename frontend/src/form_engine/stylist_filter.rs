use shared::ServiceStylistMap;

/// Stylists that can be offered for `service`.
///
/// Falls back to the full stylist list when the map has no entry for the
/// service (including the blank service).
pub fn stylist_options(service: &str, map: &ServiceStylistMap, all: &[String]) -> Vec<String> {
    match map.stylists_for(service) {
        Some(capable) => capable.to_vec(),
        None => all.to_vec(),
    }
}

/// Whether `stylist` may stay selected; the blank choice is always allowed
pub fn is_valid_stylist(stylist: &str, options: &[String]) -> bool {
    stylist.is_empty() || options.iter().any(|option| option == stylist)
}
