use yew::prelude::*;
use shared::{Appointment, Customer};

mod components;
mod form_engine;
mod hooks;
mod services;

use components::{AppointmentForm, CustomerForm};
use services::api::ApiClient;
use services::logging::{self, LoggingConfig};

/// Build-time override for the booking server; unset means same origin
const API_BASE_URL: Option<&str> = option_env!("SALON_API_BASE_URL");

#[function_component(App)]
fn app() -> Html {
    // The last saved customer; fed back so the next save updates it in place
    let customer = use_state(Customer::default);

    let on_customer_save = {
        let customer = customer.clone();
        Callback::from(move |saved: Customer| {
            log::info!("customer saved with id {:?}", saved.id);
            customer.set(saved);
        })
    };

    let on_appointment_save = Callback::from(|saved: Appointment| {
        log::info!(
            "booked {} with {} at {:?}",
            saved.service,
            saved.stylist,
            saved.starts_at
        );
    });

    let appointment = booking_for(&customer);
    let api_client = use_memo((), |_| api_client_for(API_BASE_URL));

    html! {
        <main class="salon-booking">
            <section>
                <h2>{"Customer"}</h2>
                <CustomerForm
                    original={(*customer).clone()}
                    on_save={on_customer_save}
                    api_client={(*api_client).clone()}
                />
            </section>
            <section>
                <h2>{"Appointment"}</h2>
                <AppointmentForm
                    original={appointment}
                    on_save={on_appointment_save}
                    api_client={(*api_client).clone()}
                />
            </section>
        </main>
    }
}

/// Blank appointment for `customer`, linked once the customer has been saved
fn booking_for(customer: &Customer) -> Appointment {
    Appointment {
        customer_id: customer.id.clone(),
        ..Appointment::default()
    }
}

fn api_client_for(base_url: Option<&str>) -> ApiClient {
    match base_url {
        Some(base_url) if !base_url.is_empty() => ApiClient::with_base_url(base_url.to_string()),
        _ => ApiClient::new(),
    }
}

fn main() {
    if let Err(e) = logging::init(LoggingConfig::default()) {
        gloo::console::warn!(format!("console logging unavailable: {}", e));
    }
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_links_saved_customer() {
        assert_eq!(booking_for(&Customer::default()), Appointment::default());

        let saved = Customer {
            id: Some("c-123".into()),
            ..Customer::default()
        };
        assert_eq!(booking_for(&saved).customer_id, Some("c-123".into()));
    }

    #[test]
    fn test_api_base_url_override() {
        assert_eq!(api_client_for(None).url_for("/customers"), "/customers");
        assert_eq!(api_client_for(Some("")).url_for("/customers"), "/customers");
        assert_eq!(
            api_client_for(Some("https://salon.example/")).url_for("/customers"),
            "https://salon.example/customers"
        );
    }
}
