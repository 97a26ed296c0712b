use crate::form_engine::{CustomerField, FieldValue, FormController};
use crate::hooks::use_form_submit::submit_handler;
use crate::services::api::ApiClient;
use shared::Customer;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct CustomerFormState {
    pub values: Customer,
    pub alert: Option<&'static str>,
    pub submitting: bool,
}

pub struct UseCustomerFormResult {
    pub state: CustomerFormState,
    pub actions: UseCustomerFormActions,
}

#[derive(Clone)]
pub struct UseCustomerFormActions {
    pub on_field_change: Callback<(CustomerField, String)>,
    pub on_submit: Callback<SubmitEvent>,
}

#[hook]
pub fn use_customer_form(
    original: &Customer,
    on_save: &Callback<Customer>,
    api_client: &ApiClient,
) -> UseCustomerFormResult {
    let controller = use_mut_ref(|| FormController::new(original.clone()));
    let force_update = use_force_update();

    // A new prefill snapshot replaces the form state entirely
    {
        let controller = controller.clone();
        let force_update = force_update.clone();
        use_effect_with(original.clone(), move |original| {
            if controller.borrow().fields().original() != original {
                controller.borrow_mut().reset(original.clone());
                force_update.force_update();
            }
            || ()
        });
    }

    // Outstanding saves must not touch the form after unmount
    {
        let controller = controller.clone();
        use_effect_with((), move |_| move || controller.borrow_mut().shutdown());
    }

    let on_field_change = {
        let controller = controller.clone();
        let force_update = force_update.clone();
        Callback::from(move |(field, value): (CustomerField, String)| {
            let result = controller.borrow_mut().set_field(field, FieldValue::Text(value));
            if let Err(err) = result {
                log::warn!("could not update {}: {}", field, err);
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

    let state = {
        let controller = controller.borrow();
        CustomerFormState {
            values: controller.values().clone(),
            alert: controller.alert(),
            submitting: controller.is_submitting(),
        }
    };

    let actions = UseCustomerFormActions {
        on_field_change,
        on_submit,
    };

    UseCustomerFormResult { state, actions }
}
