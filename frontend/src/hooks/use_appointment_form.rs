use crate::form_engine::{
    AppointmentFormConfig, AppointmentFormController, AppointmentFormState,
};
use crate::hooks::use_form_submit::submit_handler;
use crate::services::api::ApiClient;
use shared::{Appointment, Timestamp};
use yew::prelude::*;

pub struct UseAppointmentFormResult {
    pub state: AppointmentFormState,
    pub actions: UseAppointmentFormActions,
}

#[derive(Clone)]
pub struct UseAppointmentFormActions {
    pub on_service_change: Callback<String>,
    pub on_stylist_change: Callback<String>,
    pub on_slot_change: Callback<Timestamp>,
    pub on_submit: Callback<SubmitEvent>,
}

#[hook]
pub fn use_appointment_form(
    original: &Appointment,
    config: &AppointmentFormConfig,
    on_save: &Callback<Appointment>,
    api_client: &ApiClient,
) -> UseAppointmentFormResult {
    let controller = use_mut_ref(|| AppointmentFormController::new(original.clone(), config.clone()));
    let force_update = use_force_update();

    {
        let controller = controller.clone();
        let force_update = force_update.clone();
        use_effect_with(original.clone(), move |original| {
            if controller.borrow().form().fields().original() != original {
                controller.borrow_mut().reset(original.clone());
                force_update.force_update();
            }
            || ()
        });
    }

    // Hours, week, options or availability supplied by the page changed
    {
        let controller = controller.clone();
        let force_update = force_update.clone();
        use_effect_with(config.clone(), move |config| {
            if controller.borrow().config() != config {
                controller.borrow_mut().reconfigure(config.clone());
                force_update.force_update();
            }
            || ()
        });
    }

    {
        let controller = controller.clone();
        use_effect_with((), move |_| move || controller.borrow_mut().form_mut().shutdown());
    }

    let on_service_change = {
        let controller = controller.clone();
        let force_update = force_update.clone();
        Callback::from(move |service: String| {
            let result = controller.borrow_mut().select_service(&service);
            if let Err(err) = result {
                log::warn!("service not selected: {}", err);
            }
            force_update.force_update();
        })
    };

    let on_stylist_change = {
        let controller = controller.clone();
        let force_update = force_update.clone();
        Callback::from(move |stylist: String| {
            let result = controller.borrow_mut().select_stylist(&stylist);
            if let Err(err) = result {
                log::warn!("stylist not selected: {}", err);
            }
            force_update.force_update();
        })
    };

    let on_slot_change = {
        let controller = controller.clone();
        let force_update = force_update.clone();
        Callback::from(move |starts_at: Timestamp| {
            let result = controller.borrow_mut().select_slot(starts_at);
            if let Err(err) = result {
                log::warn!("slot not selected: {}", err);
            }
            force_update.force_update();
        })
    };

    let on_submit = submit_handler(
        controller.clone(),
        api_client.clone(),
        on_save.clone(),
        force_update,
    );

    let state = controller.borrow().view();

    let actions = UseAppointmentFormActions {
        on_service_change,
        on_stylist_change,
        on_slot_change,
        on_submit,
    };

    UseAppointmentFormResult { state, actions }
}
