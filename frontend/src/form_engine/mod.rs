//! Headless engine behind the customer and appointment forms.

pub mod availability;
pub mod config;
pub mod controller;
pub mod field_state;
pub mod stylist_filter;
pub mod submission;
pub mod time_slot_grid;

pub use config::AppointmentFormConfig;
pub use controller::{
    AppointmentFormController, AppointmentFormState, FormController, SlotRow, Submittable,
};
pub use field_state::{CustomerField, FieldValue, FormRecord};
pub use submission::{HttpResponse, Transport, TransportError, WriteMethod, WriteRequest};
