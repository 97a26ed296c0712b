use crate::form_engine::submission::PendingSubmission;
use crate::form_engine::{Submittable, Transport};
use crate::services::api::ApiClient;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

/// Build the `onsubmit` handler for a form driven by `controller`.
///
/// The submit event's default navigation is always cancelled. While a save is
/// outstanding further submits are refused by the controller, and a response
/// that arrives after the form was reset or unmounted is dropped.
pub fn submit_handler<C>(
    controller: Rc<RefCell<C>>,
    api_client: ApiClient,
    on_save: Callback<C::Record>,
    force_update: UseForceUpdateHandle,
) -> Callback<SubmitEvent>
where
    C: Submittable + 'static,
    C::Record: 'static,
{
    Callback::from(move |e: SubmitEvent| {
        let started = controller.borrow_mut().handle_submit_event(&e);
        force_update.force_update();

        let pending = match started {
            Ok(pending) => pending,
            Err(err) => {
                log::warn!("save not started: {}", err);
                return;
            }
        };

        let controller = controller.clone();
        let api_client = api_client.clone();
        let on_save = on_save.clone();
        let force_update = force_update.clone();

        spawn_local(async move {
            let refresh = || force_update.force_update();
            deliver(&*controller, &api_client, pending, refresh, &on_save).await;
        });
    })
}

/// Send `pending` and record the outcome on `controller`.
///
/// The controller is borrowed only while the outcome is recorded; `refresh`
/// and `on_save` run afterwards and may read the form again. Returns `false`
/// when the outcome was discarded because the form was reset or unmounted.
pub async fn deliver<C, T>(
    controller: &RefCell<C>,
    transport: &T,
    pending: PendingSubmission<C::Record>,
    refresh: impl Fn(),
    on_save: &Callback<C::Record>,
) -> bool
where
    C: Submittable,
    T: Transport + ?Sized,
{
    let outcome = transport.send(pending.request().clone()).await;
    let result = controller.borrow_mut().complete_submit(pending, outcome);

    match result {
        Some(Ok(saved)) => {
            refresh();
            on_save.emit(saved);
            true
        }
        Some(Err(_)) => {
            refresh();
            true
        }
        None => {
            log::debug!("form was reset or unmounted before the save finished");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_engine::submission::tests::StubTransport;
    use crate::form_engine::submission::SAVE_ERROR_ALERT;
    use crate::form_engine::{CustomerField, FieldValue, FormController, WriteMethod};
    use serde_json::{json, Value};
    use shared::Customer;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<Customer>>>, Callback<Customer>) {
        let saved = Rc::new(RefCell::new(Vec::new()));
        let sink = saved.clone();
        let on_save = Callback::from(move |customer: Customer| sink.borrow_mut().push(customer));
        (saved, on_save)
    }

    #[tokio::test]
    async fn test_success_callback_receives_assigned_id() {
        let transport = StubTransport::responding(201, r#"{"id": 123}"#);
        let controller = RefCell::new(FormController::new(Customer::default()));
        controller
            .borrow_mut()
            .set_field(CustomerField::FirstName, FieldValue::text("Jamie"))
            .unwrap();
        let (saved, on_save) = recorder();
        let refreshes = Cell::new(0);

        let pending = controller.borrow_mut().begin_submit().unwrap();
        let refresh = || refreshes.set(refreshes.get() + 1);
        let applied = deliver(&controller, &transport, pending, refresh, &on_save).await;

        assert!(applied);
        assert_eq!(refreshes.get(), 1);
        assert_eq!(transport.request_count(), 1);
        let body: Value = serde_json::from_str(&transport.requests.borrow()[0].body).unwrap();
        assert_eq!(body["firstName"], json!("Jamie"));

        let saved = saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, Some(123.into()));
        assert_eq!(saved[0].first_name, "Jamie");
        assert_eq!(controller.borrow().alert(), None);
    }

    #[tokio::test]
    async fn test_failed_save_skips_callback_and_raises_alert() {
        let transport = StubTransport::responding(500, "");
        let original = Customer {
            first_name: "Ashley".to_string(),
            ..Customer::default()
        };
        let controller = RefCell::new(FormController::new(original.clone()));
        let (saved, on_save) = recorder();

        let pending = controller.borrow_mut().begin_submit().unwrap();
        let applied = deliver(&controller, &transport, pending, || (), &on_save).await;

        assert!(applied);
        assert!(saved.borrow().is_empty());
        let controller = controller.borrow();
        assert_eq!(controller.values(), &original);
        assert_eq!(controller.alert(), Some(SAVE_ERROR_ALERT));
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn test_callback_can_read_the_form() {
        let transport = StubTransport::responding(201, r#"{"id": "c-123"}"#);
        let controller = Rc::new(RefCell::new(FormController::new(Customer::default())));
        let seen = Rc::new(Cell::new(None));
        let on_save = {
            let controller = controller.clone();
            let seen = seen.clone();
            Callback::from(move |_: Customer| seen.set(Some(controller.borrow().is_submitting())))
        };

        let pending = controller.borrow_mut().begin_submit().unwrap();
        deliver(&*controller, &transport, pending, || (), &on_save).await;

        assert_eq!(seen.get(), Some(false));
    }

    #[tokio::test]
    async fn test_saved_record_fed_back_is_updated_in_place() {
        let transport = StubTransport::responding(201, r#"{"id": 123}"#).then_responding(200, "");
        let controller = RefCell::new(FormController::new(Customer::default()));
        let (saved, on_save) = recorder();

        let pending = controller.borrow_mut().begin_submit().unwrap();
        deliver(&controller, &transport, pending, || (), &on_save).await;
        let first = saved.borrow()[0].clone();
        controller.borrow_mut().reset(first.clone());

        let pending = controller.borrow_mut().begin_submit().unwrap();
        assert!(deliver(&controller, &transport, pending, || (), &on_save).await);

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].method, WriteMethod::Create);
        assert_eq!(requests[1].method, WriteMethod::Update);
        assert_eq!(requests[1].path, "/customers/123");
        assert_eq!(saved.borrow()[1], first);
    }

    #[tokio::test]
    async fn test_reset_before_reply_drops_the_outcome() {
        let transport = StubTransport::responding(201, r#"{"id": 5}"#);
        let controller = RefCell::new(FormController::new(Customer::default()));
        let (saved, on_save) = recorder();
        let refreshes = Cell::new(0);

        let pending = controller.borrow_mut().begin_submit().unwrap();
        let replacement = Customer {
            first_name: "Jordan".to_string(),
            ..Customer::default()
        };
        controller.borrow_mut().reset(replacement.clone());
        let refresh = || refreshes.set(refreshes.get() + 1);
        let applied = deliver(&controller, &transport, pending, refresh, &on_save).await;

        assert!(!applied);
        assert_eq!(refreshes.get(), 0);
        assert!(saved.borrow().is_empty());
        assert_eq!(controller.borrow().values(), &replacement);
    }
}
