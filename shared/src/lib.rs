use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier assigned by the server the first time a record is saved.
///
/// Opaque to the client: whatever JSON number or string the server hands out
/// is kept as-is and echoed back on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// Epoch milliseconds, as exchanged with the server
pub type Timestamp = i64;

/// A salon customer as captured by the customer form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    /// Absent until the server has stored the customer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
}

/// An appointment booking as captured by the appointment form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Appointment {
    pub service: String,
    pub stylist: String,
    /// Start of the chosen slot; `None` until a slot is picked
    pub starts_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<RecordId>,
}

/// A slot the server reports as not yet booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub starts_at: Timestamp,
}

impl TimeSlot {
    pub fn new(starts_at: Timestamp) -> Self {
        Self { starts_at }
    }
}

/// Which stylists are able to perform which service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceStylistMap(BTreeMap<String, Vec<String>>);

impl ServiceStylistMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Register the stylists able to perform `service`, replacing any previous entry
    pub fn insert<S, I>(&mut self, service: S, stylists: I)
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.0
            .insert(service.into(), stylists.into_iter().map(Into::into).collect());
    }

    /// Capable stylists for `service`, or `None` when no capability data exists
    pub fn stylists_for(&self, service: &str) -> Option<&[String]> {
        self.0.get(service).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The capability table of the salon this app was built for
    pub fn salon_default() -> Self {
        let all = ["Ashley", "Jo", "Pat", "Sam"];
        let mut map = Self::new();
        map.insert("Cut", all);
        map.insert("Blow-dry", all);
        map.insert("Cut & color", ["Ashley", "Jo"]);
        map.insert("Beard trim", ["Pat", "Sam"]);
        map.insert("Cut & beard trim", ["Pat", "Sam"]);
        map.insert("Extensions", ["Ashley", "Pat"]);
        map
    }
}

impl<S, I> FromIterator<(S, I)> for ServiceStylistMap
where
    S: Into<String>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (S, I)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (service, stylists) in iter {
            map.insert(service, stylists);
        }
        map
    }
}

/// Services offered by default, in display order
pub fn default_services() -> Vec<String> {
    [
        "Cut",
        "Blow-dry",
        "Cut & color",
        "Beard trim",
        "Cut & beard trim",
        "Extensions",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Stylists working at the salon by default
pub fn default_stylists() -> Vec<String> {
    ["Ashley", "Jo", "Pat", "Sam"]
        .into_iter()
        .map(String::from)
        .collect()
}
