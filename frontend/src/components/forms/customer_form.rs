use crate::form_engine::{CustomerField, FormRecord};
use crate::hooks::use_customer_form;
use crate::services::api::ApiClient;
use shared::Customer;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CustomerFormProps {
    /// Prefill values; a new value resets the form
    #[prop_or_default]
    pub original: Customer,
    #[prop_or_default]
    pub on_save: Callback<Customer>,
    #[prop_or_default]
    pub api_client: ApiClient,
}

#[function_component(CustomerForm)]
pub fn customer_form(props: &CustomerFormProps) -> Html {
    let form = use_customer_form(&props.original, &props.on_save, &props.api_client);

    html! {
        <CustomerFormView
            values={form.state.values}
            alert={form.state.alert}
            submitting={form.state.submitting}
            on_field_change={form.actions.on_field_change}
            on_submit={form.actions.on_submit}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct CustomerFormViewProps {
    // Form state
    pub values: Customer,
    pub alert: Option<&'static str>,
    pub submitting: bool,

    // Event handlers
    pub on_field_change: Callback<(CustomerField, String)>,
    pub on_submit: Callback<SubmitEvent>,
}

#[function_component(CustomerFormView)]
pub fn customer_form_view(props: &CustomerFormViewProps) -> Html {
    let field_input = |field: CustomerField| {
        let on_field_change = props.on_field_change.clone();
        let onchange = Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_field_change.emit((field, input.value()));
        });
        let value = props.values.get(field).as_text().unwrap_or_default().to_string();

        html! {
            <div class="form-group">
                <label for={field.name()}>{field.label()}</label>
                <input
                    type="text"
                    id={field.name()}
                    name={field.name()}
                    value={value}
                    onchange={onchange}
                    disabled={props.submitting}
                />
            </div>
        }
    };

    html! {
        <form id="customer" class="customer-form" onsubmit={props.on_submit.clone()}>
            {if let Some(alert) = props.alert {
                html! {
                    <div class="form-message error" role="alert">
                        {alert}
                    </div>
                }
            } else { html! {} }}

            {for Customer::fields().iter().copied().map(field_input)}

            <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                {"Add"}
            </button>
        </form>
    }
}
