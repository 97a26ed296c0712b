use crate::components::time_slot_table::TimeSlotTable;
use crate::form_engine::{AppointmentFormConfig, AppointmentFormState};
use crate::hooks::use_appointment_form;
use crate::services::api::ApiClient;
use shared::{Appointment, Timestamp};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AppointmentFormProps {
    #[prop_or_default]
    pub original: Appointment,
    #[prop_or_default]
    pub config: AppointmentFormConfig,
    #[prop_or_default]
    pub on_save: Callback<Appointment>,
    #[prop_or_default]
    pub api_client: ApiClient,
}

#[function_component(AppointmentForm)]
pub fn appointment_form(props: &AppointmentFormProps) -> Html {
    let form = use_appointment_form(
        &props.original,
        &props.config,
        &props.on_save,
        &props.api_client,
    );

    html! {
        <AppointmentFormView
            state={form.state}
            on_service_change={form.actions.on_service_change}
            on_stylist_change={form.actions.on_stylist_change}
            on_slot_change={form.actions.on_slot_change}
            on_submit={form.actions.on_submit}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct AppointmentFormViewProps {
    pub state: AppointmentFormState,
    pub on_service_change: Callback<String>,
    pub on_stylist_change: Callback<String>,
    pub on_slot_change: Callback<Timestamp>,
    pub on_submit: Callback<SubmitEvent>,
}

#[function_component(AppointmentFormView)]
pub fn appointment_form_view(props: &AppointmentFormViewProps) -> Html {
    let state = &props.state;

    let on_service_change = {
        let on_service_change = props.on_service_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_service_change.emit(select.value());
        })
    };

    let on_stylist_change = {
        let on_stylist_change = props.on_stylist_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_stylist_change.emit(select.value());
        })
    };

    html! {
        <form id="appointment" class="appointment-form" onsubmit={props.on_submit.clone()}>
            {if let Some(alert) = state.alert {
                html! {
                    <div class="form-message error" role="alert">
                        {alert}
                    </div>
                }
            } else { html! {} }}

            <div class="form-group">
                <label for="service">{"Salon service"}</label>
                <select
                    id="service"
                    name="service"
                    onchange={on_service_change}
                    disabled={state.submitting}
                >
                    {select_options(&state.services, &state.service)}
                </select>
            </div>

            <div class="form-group">
                <label for="stylist">{"Stylist"}</label>
                <select
                    id="stylist"
                    name="stylist"
                    onchange={on_stylist_change}
                    disabled={state.submitting}
                >
                    {select_options(&state.stylists, &state.stylist)}
                </select>
            </div>

            <TimeSlotTable
                date_headers={state.date_headers.clone()}
                rows={state.rows.clone()}
                on_select={props.on_slot_change.clone()}
                disabled={state.submitting}
            />

            <button type="submit" class="btn btn-primary" disabled={state.submitting}>
                {"Add"}
            </button>
        </form>
    }
}

/// A blank option first so nothing is picked until the user chooses
fn select_options(options: &[String], selected: &str) -> Html {
    html! {
        <>
            <option value="" selected={selected.is_empty()}></option>
            {for options.iter().map(|option| {
                html! {
                    <option value={option.clone()} selected={option == selected}>
                        {option}
                    </option>
                }
            })}
        </>
    }
}
