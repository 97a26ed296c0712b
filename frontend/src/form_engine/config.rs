use chrono::{Local, NaiveDate};
use shared::{default_services, default_stylists, ServiceStylistMap, TimeSlot};

/// Everything the hosting page can tune on the appointment form
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentFormConfig {
    pub selectable_services: Vec<String>,
    pub selectable_stylists: Vec<String>,
    pub service_stylists: ServiceStylistMap,
    /// First bookable hour (inclusive)
    pub salon_opens_at: u32,
    /// Closing hour (exclusive)
    pub salon_closes_at: u32,
    /// First day of the displayed week
    pub today: NaiveDate,
    pub available_time_slots: Vec<TimeSlot>,
}

impl Default for AppointmentFormConfig {
    fn default() -> Self {
        Self {
            selectable_services: default_services(),
            selectable_stylists: default_stylists(),
            service_stylists: ServiceStylistMap::salon_default(),
            salon_opens_at: 9,  // 9am
            salon_closes_at: 19, // 7pm
            today: Local::now().date_naive(),
            available_time_slots: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = AppointmentFormConfig::default();
        assert_eq!(config.salon_opens_at, 9);
        assert_eq!(config.salon_closes_at, 19);
        assert_eq!(config.selectable_services.len(), 6);
        assert_eq!(config.selectable_stylists, vec!["Ashley", "Jo", "Pat", "Sam"]);
        assert!(config.available_time_slots.is_empty());
        assert!(!config.service_stylists.is_empty());
    }
}
