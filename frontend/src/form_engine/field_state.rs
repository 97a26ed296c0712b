//! Controlled field state for the booking forms.
//!
//! A `FieldState` always holds a complete record: fields missing from the
//! prefill snapshot come in as their blank value (empty text, unset time) and
//! every edit replaces exactly one field.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Appointment, Customer, RecordId, Timestamp};
use std::fmt;
use thiserror::Error;

/// Value carried by a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text inputs and select boxes
    Text(String),
    /// The slot field; `None` is the unset sentinel
    Timestamp(Option<Timestamp>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Timestamp(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field `{field}` expects a {expected} value")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

/// A record that can be edited field by field and saved through the API
pub trait FormRecord: Clone + Default + PartialEq + fmt::Debug + Serialize + DeserializeOwned {
    type Field: Copy + Eq + fmt::Debug + fmt::Display + 'static;

    /// Collection the record is created under, e.g. `/customers`
    const COLLECTION: &'static str;

    /// Every editable field, in display order
    fn fields() -> &'static [Self::Field];

    fn get(&self, field: Self::Field) -> FieldValue;

    fn put(&mut self, field: Self::Field, value: FieldValue) -> Result<(), FieldError>;

    fn identifier(&self) -> Option<RecordId>;

    /// Path the record is written to: the collection on create, the member on update
    fn resource_path(&self) -> String {
        match self.identifier() {
            Some(id) => format!("{}/{}", Self::COLLECTION, id),
            None => Self::COLLECTION.to_string(),
        }
    }
}

fn expect_text(field: &'static str, value: FieldValue) -> Result<String, FieldError> {
    match value {
        FieldValue::Text(text) => Ok(text),
        FieldValue::Timestamp(_) => Err(FieldError::TypeMismatch {
            field,
            expected: "text",
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    FirstName,
    LastName,
    PhoneNumber,
}

impl CustomerField {
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::PhoneNumber => "phoneNumber",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::PhoneNumber => "Phone number",
        }
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FormRecord for Customer {
    type Field = CustomerField;

    const COLLECTION: &'static str = "/customers";

    fn fields() -> &'static [CustomerField] {
        &[
            CustomerField::FirstName,
            CustomerField::LastName,
            CustomerField::PhoneNumber,
        ]
    }

    fn get(&self, field: CustomerField) -> FieldValue {
        let value = match field {
            CustomerField::FirstName => &self.first_name,
            CustomerField::LastName => &self.last_name,
            CustomerField::PhoneNumber => &self.phone_number,
        };
        FieldValue::Text(value.clone())
    }

    fn put(&mut self, field: CustomerField, value: FieldValue) -> Result<(), FieldError> {
        let text = expect_text(field.name(), value)?;
        match field {
            CustomerField::FirstName => self.first_name = text,
            CustomerField::LastName => self.last_name = text,
            CustomerField::PhoneNumber => self.phone_number = text,
        }
        Ok(())
    }

    fn identifier(&self) -> Option<RecordId> {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentField {
    Service,
    Stylist,
    StartsAt,
}

impl AppointmentField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Stylist => "stylist",
            Self::StartsAt => "startsAt",
        }
    }
}

impl fmt::Display for AppointmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FormRecord for Appointment {
    type Field = AppointmentField;

    const COLLECTION: &'static str = "/appointments";

    fn fields() -> &'static [AppointmentField] {
        &[
            AppointmentField::Service,
            AppointmentField::Stylist,
            AppointmentField::StartsAt,
        ]
    }

    fn get(&self, field: AppointmentField) -> FieldValue {
        match field {
            AppointmentField::Service => FieldValue::Text(self.service.clone()),
            AppointmentField::Stylist => FieldValue::Text(self.stylist.clone()),
            AppointmentField::StartsAt => FieldValue::Timestamp(self.starts_at),
        }
    }

    fn put(&mut self, field: AppointmentField, value: FieldValue) -> Result<(), FieldError> {
        match field {
            AppointmentField::Service => self.service = expect_text(field.name(), value)?,
            AppointmentField::Stylist => self.stylist = expect_text(field.name(), value)?,
            AppointmentField::StartsAt => match value {
                FieldValue::Timestamp(starts_at) => self.starts_at = starts_at,
                FieldValue::Text(_) => {
                    return Err(FieldError::TypeMismatch {
                        field: field.name(),
                        expected: "timestamp",
                    })
                }
            },
        }
        Ok(())
    }

    // Appointments are always booked as new records.
    fn identifier(&self) -> Option<RecordId> {
        None
    }
}

/// Current values of a form plus the snapshot it was prefilled from
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState<R: FormRecord> {
    original: R,
    current: R,
}

impl<R: FormRecord> FieldState<R> {
    pub fn initialize(original: R) -> Self {
        Self {
            current: original.clone(),
            original,
        }
    }

    pub fn set_field(&mut self, field: R::Field, value: FieldValue) -> Result<(), FieldError> {
        self.current.put(field, value)
    }

    pub fn current_values(&self) -> &R {
        &self.current
    }

    pub fn original(&self) -> &R {
        &self.original
    }
}
