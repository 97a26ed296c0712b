pub mod forms;
pub mod time_slot_table;

pub use forms::{AppointmentForm, CustomerForm};
