pub mod appointment_form;
pub mod customer_form;

pub use appointment_form::AppointmentForm;
pub use customer_form::CustomerForm;
