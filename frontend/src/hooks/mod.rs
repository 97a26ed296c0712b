pub mod use_appointment_form;
pub mod use_customer_form;
pub mod use_form_submit;

pub use use_appointment_form::use_appointment_form;
pub use use_customer_form::use_customer_form;
