//! Form controllers: the single owner of a form's field state and save status.
//!
//! Views never mutate state directly. They call the controller and re-render
//! from the projection it returns.

use super::availability::Availability;
use super::config::AppointmentFormConfig;
use super::field_state::{AppointmentField, FieldError, FieldState, FieldValue, FormRecord};
use super::stylist_filter::{is_valid_stylist, stylist_options};
use super::submission::{
    HttpResponse, PendingSubmission, SubmissionError, SubmissionPipeline, TransportError,
};
use super::time_slot_grid::{GridCell, TimeSlotGrid};
use chrono::{Local, TimeZone};
use shared::{Appointment, Timestamp};
use thiserror::Error;

/// An input event whose default browser action can be cancelled
pub trait PreventDefault {
    fn prevent_default(&self);
}

impl PreventDefault for web_sys::SubmitEvent {
    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self);
    }
}

/// A controller that can start a save from a submit event and later resolve it
pub trait Submittable {
    type Record: FormRecord;

    fn handle_submit_event<E: PreventDefault + ?Sized>(
        &mut self,
        event: &E,
    ) -> Result<PendingSubmission<Self::Record>, SubmissionError>;

    fn complete_submit(
        &mut self,
        pending: PendingSubmission<Self::Record>,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Option<Result<Self::Record, SubmissionError>>;
}

pub struct FormController<R: FormRecord> {
    fields: FieldState<R>,
    pipeline: SubmissionPipeline<R>,
}

impl<R: FormRecord> FormController<R> {
    pub fn new(original: R) -> Self {
        Self {
            fields: FieldState::initialize(original),
            pipeline: SubmissionPipeline::new(),
        }
    }

    /// Start over from a new prefill snapshot, dropping any outstanding save
    pub fn reset(&mut self, original: R) {
        log::debug!("resetting {} form", R::COLLECTION);
        self.fields = FieldState::initialize(original);
        self.pipeline.invalidate();
    }

    /// Called on teardown so a late response cannot touch the form
    pub fn shutdown(&mut self) {
        self.pipeline.invalidate();
    }

    pub fn fields(&self) -> &FieldState<R> {
        &self.fields
    }

    pub fn values(&self) -> &R {
        self.fields.current_values()
    }

    pub fn alert(&self) -> Option<&'static str> {
        self.pipeline.status().alert()
    }

    pub fn is_submitting(&self) -> bool {
        self.pipeline.status().is_in_flight()
    }

    pub fn set_field(&mut self, field: R::Field, value: FieldValue) -> Result<(), FieldError> {
        self.fields.set_field(field, value)
    }

    /// Cancel the event's default action and start a save
    pub fn handle_submit_event<E: PreventDefault + ?Sized>(
        &mut self,
        event: &E,
    ) -> Result<PendingSubmission<R>, SubmissionError> {
        event.prevent_default();
        self.begin_submit()
    }

    pub fn begin_submit(&mut self) -> Result<PendingSubmission<R>, SubmissionError> {
        self.pipeline.begin(self.fields.current_values())
    }

    /// Record the outcome of `pending`; `None` if the form moved on since it began
    pub fn complete_submit(
        &mut self,
        pending: PendingSubmission<R>,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Option<Result<R, SubmissionError>> {
        self.pipeline.complete(pending, outcome)
    }
}

impl<R: FormRecord> Submittable for FormController<R> {
    type Record = R;

    fn handle_submit_event<E: PreventDefault + ?Sized>(
        &mut self,
        event: &E,
    ) -> Result<PendingSubmission<R>, SubmissionError> {
        FormController::handle_submit_event(self, event)
    }

    fn complete_submit(
        &mut self,
        pending: PendingSubmission<R>,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Option<Result<R, SubmissionError>> {
        FormController::complete_submit(self, pending, outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("service `{0}` is not offered")]
    UnknownService(String),
    #[error("stylist `{stylist}` does not perform `{service}`")]
    StylistNotOffered { stylist: String, service: String },
    #[error("no bookable slot starts at {0}")]
    SlotNotOfferable(Timestamp),
}

/// A grid cell as the view should draw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCell {
    /// Present only for offerable cells; those get a radio button
    pub starts_at: Option<Timestamp>,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub label: String,
    pub cells: Vec<SlotCell>,
}

/// Everything the appointment form renders, derived from controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentFormState {
    pub services: Vec<String>,
    pub service: String,
    pub stylists: Vec<String>,
    pub stylist: String,
    pub date_headers: Vec<String>,
    pub rows: Vec<SlotRow>,
    pub alert: Option<&'static str>,
    pub submitting: bool,
}

pub struct AppointmentFormController<Tz: TimeZone = Local> {
    form: FormController<Appointment>,
    config: AppointmentFormConfig,
    tz: Tz,
    grid: TimeSlotGrid,
    cells: Vec<GridCell>,
    availability: Availability,
}

impl AppointmentFormController<Local> {
    pub fn new(original: Appointment, config: AppointmentFormConfig) -> Self {
        Self::with_time_zone(original, config, Local)
    }
}

impl<Tz: TimeZone> AppointmentFormController<Tz> {
    pub fn with_time_zone(original: Appointment, config: AppointmentFormConfig, tz: Tz) -> Self {
        let grid = TimeSlotGrid::new(config.salon_opens_at, config.salon_closes_at, config.today);
        let cells = grid.cells(&tz);
        let availability = Availability::new(&config.available_time_slots);
        Self {
            form: FormController::new(original),
            config,
            tz,
            grid,
            cells,
            availability,
        }
    }

    pub fn form(&self) -> &FormController<Appointment> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController<Appointment> {
        &mut self.form
    }

    pub fn config(&self) -> &AppointmentFormConfig {
        &self.config
    }

    pub fn values(&self) -> &Appointment {
        self.form.values()
    }

    pub fn reset(&mut self, original: Appointment) {
        self.form.reset(original);
    }

    /// Apply new options from the hosting page and re-derive the grid
    pub fn reconfigure(&mut self, config: AppointmentFormConfig) {
        self.grid = TimeSlotGrid::new(config.salon_opens_at, config.salon_closes_at, config.today);
        self.cells = self.grid.cells(&self.tz);
        self.availability = Availability::new(&config.available_time_slots);
        self.config = config;

        if let Some(starts_at) = self.values().starts_at {
            if !self.is_offerable(starts_at) {
                log::info!("slot {} is no longer offered; clearing selection", starts_at);
                self.put(AppointmentField::StartsAt, FieldValue::Timestamp(None));
            }
        }
        self.drop_stale_stylist();
    }

    pub fn stylist_options(&self) -> Vec<String> {
        stylist_options(
            &self.values().service,
            &self.config.service_stylists,
            &self.config.selectable_stylists,
        )
    }

    pub fn is_offerable(&self, starts_at: Timestamp) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.starts_at == Some(starts_at) && self.availability.cell_is_offerable(cell))
    }

    /// Choose a service; a stylist who cannot perform it is deselected
    pub fn select_service(&mut self, service: &str) -> Result<(), SelectionError> {
        if !service.is_empty() && !self.config.selectable_services.iter().any(|s| s == service) {
            return Err(SelectionError::UnknownService(service.to_string()));
        }
        self.put(AppointmentField::Service, FieldValue::text(service));
        self.drop_stale_stylist();
        Ok(())
    }

    pub fn select_stylist(&mut self, stylist: &str) -> Result<(), SelectionError> {
        if !is_valid_stylist(stylist, &self.stylist_options()) {
            return Err(SelectionError::StylistNotOffered {
                stylist: stylist.to_string(),
                service: self.values().service.clone(),
            });
        }
        self.put(AppointmentField::Stylist, FieldValue::text(stylist));
        Ok(())
    }

    /// Pick a slot; only offerable cells of the displayed week are accepted
    pub fn select_slot(&mut self, starts_at: Timestamp) -> Result<(), SelectionError> {
        if !self.is_offerable(starts_at) {
            return Err(SelectionError::SlotNotOfferable(starts_at));
        }
        self.put(AppointmentField::StartsAt, FieldValue::Timestamp(Some(starts_at)));
        Ok(())
    }

    pub fn view(&self) -> AppointmentFormState {
        let values = self.values();
        let days = self.grid.dates().len().max(1);
        let rows = self
            .grid
            .time_labels()
            .into_iter()
            .zip(self.cells.chunks(days))
            .map(|(label, cells)| SlotRow {
                label,
                cells: cells
                    .iter()
                    .map(|cell| {
                        let starts_at = cell
                            .starts_at
                            .filter(|_| self.availability.cell_is_offerable(cell));
                        SlotCell {
                            starts_at,
                            checked: starts_at.is_some() && starts_at == values.starts_at,
                        }
                    })
                    .collect(),
            })
            .collect();

        AppointmentFormState {
            services: self.config.selectable_services.clone(),
            service: values.service.clone(),
            stylists: self.stylist_options(),
            stylist: values.stylist.clone(),
            date_headers: self.grid.date_headers(),
            rows,
            alert: self.form.alert(),
            submitting: self.form.is_submitting(),
        }
    }

    fn drop_stale_stylist(&mut self) {
        let stylist = self.values().stylist.clone();
        if !is_valid_stylist(&stylist, &self.stylist_options()) {
            log::info!(
                "stylist {} does not perform {}; clearing selection",
                stylist,
                self.values().service
            );
            self.put(AppointmentField::Stylist, FieldValue::text(""));
        }
    }

    // Field and value types are matched by the callers above.
    fn put(&mut self, field: AppointmentField, value: FieldValue) {
        if let Err(err) = self.form.set_field(field, value) {
            log::error!("could not update {}: {}", field, err);
        }
    }
}

impl<Tz: TimeZone> Submittable for AppointmentFormController<Tz> {
    type Record = Appointment;

    fn handle_submit_event<E: PreventDefault + ?Sized>(
        &mut self,
        event: &E,
    ) -> Result<PendingSubmission<Appointment>, SubmissionError> {
        self.form.handle_submit_event(event)
    }

    fn complete_submit(
        &mut self,
        pending: PendingSubmission<Appointment>,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Option<Result<Appointment, SubmissionError>> {
        self.form.complete_submit(pending, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_engine::field_state::CustomerField;
    use crate::form_engine::submission::{TransportError, SAVE_ERROR_ALERT};
    use chrono::{NaiveDate, Utc};
    use serde_json::{json, Value};
    use shared::{Customer, TimeSlot};
    use std::cell::Cell;

    #[derive(Default)]
    struct StubEvent {
        prevented: Cell<bool>,
    }

    impl PreventDefault for StubEvent {
        fn prevent_default(&self) {
            self.prevented.set(true);
        }
    }

    fn at(day: u32, hour: u32, minute: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2018, 12, day, hour, minute, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn config() -> AppointmentFormConfig {
        AppointmentFormConfig {
            salon_opens_at: 9,
            salon_closes_at: 11,
            today: NaiveDate::from_ymd_opt(2018, 12, 1).unwrap(),
            available_time_slots: vec![TimeSlot::new(at(1, 9, 0)), TimeSlot::new(at(2, 10, 30))],
            ..AppointmentFormConfig::default()
        }
    }

    fn controller(original: Appointment) -> AppointmentFormController<Utc> {
        AppointmentFormController::with_time_zone(original, config(), Utc)
    }

    fn booked_with_ashley() -> Appointment {
        Appointment {
            service: "Cut".to_string(),
            stylist: "Ashley".to_string(),
            starts_at: Some(at(1, 9, 0)),
            customer_id: None,
        }
    }

    fn created(body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 201,
            body: body.to_string(),
        })
    }

    #[test]
    fn test_service_change_keeps_other_fields() {
        let mut controller = controller(booked_with_ashley());
        controller.select_service("Blow-dry").unwrap();

        let values = controller.values();
        assert_eq!(values.service, "Blow-dry");
        assert_eq!(values.stylist, "Ashley");
        assert_eq!(values.starts_at, Some(at(1, 9, 0)));
    }

    #[test]
    fn test_service_change_clears_stylist_who_cannot_perform_it() {
        let mut controller = controller(booked_with_ashley());
        controller.select_service("Beard trim").unwrap();

        assert_eq!(controller.values().stylist, "");
        assert_eq!(controller.stylist_options(), vec!["Pat", "Sam"]);
        assert_eq!(controller.values().starts_at, Some(at(1, 9, 0)));
    }

    #[test]
    fn test_stylist_options_follow_capability_map() {
        let config = AppointmentFormConfig {
            selectable_services: vec!["1".to_string(), "2".to_string()],
            selectable_stylists: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            service_stylists: [("1", vec!["A", "B"])].into_iter().collect(),
            ..config()
        };
        let original = Appointment {
            service: "1".to_string(),
            ..Appointment::default()
        };
        let mut controller = AppointmentFormController::with_time_zone(original, config, Utc);
        assert_eq!(controller.stylist_options(), vec!["A", "B"]);

        controller.select_service("2").unwrap();
        assert_eq!(controller.stylist_options(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_unknown_service_and_stylist_are_rejected() {
        let mut controller = controller(Appointment::default());
        assert_eq!(
            controller.select_service("Perm"),
            Err(SelectionError::UnknownService("Perm".to_string()))
        );

        controller.select_service("Beard trim").unwrap();
        assert!(matches!(
            controller.select_stylist("Jo"),
            Err(SelectionError::StylistNotOffered { .. })
        ));
        controller.select_stylist("Sam").unwrap();
        assert_eq!(controller.values().stylist, "Sam");
    }

    #[test]
    fn test_only_offerable_slots_can_be_selected() {
        let mut controller = controller(Appointment::default());

        assert_eq!(
            controller.select_slot(at(1, 9, 30)),
            Err(SelectionError::SlotNotOfferable(at(1, 9, 30)))
        );
        assert_eq!(controller.values().starts_at, None);

        controller.select_slot(at(2, 10, 30)).unwrap();
        assert_eq!(controller.values().starts_at, Some(at(2, 10, 30)));
    }

    #[test]
    fn test_view_offers_radio_only_for_available_slots() {
        let mut controller = controller(Appointment::default());
        controller.select_slot(at(1, 9, 0)).unwrap();
        let view = controller.view();

        assert_eq!(view.date_headers[0], "Sat 01");
        let labels: Vec<_> = view.rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["09:00", "09:30", "10:00", "10:30"]);

        let offered: Vec<(usize, usize, bool)> = view
            .rows
            .iter()
            .enumerate()
            .flat_map(|(row, slot_row)| {
                slot_row
                    .cells
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.starts_at.is_some())
                    .map(move |(day, cell)| (row, day, cell.checked))
            })
            .collect();
        assert_eq!(offered, vec![(0, 0, true), (3, 1, false)]);
        assert!(view.rows.iter().all(|row| row.cells.len() == 7));
    }

    #[test]
    fn test_view_with_no_availability_has_no_radios() {
        let config = AppointmentFormConfig {
            available_time_slots: Vec::new(),
            ..config()
        };
        let controller = AppointmentFormController::with_time_zone(Appointment::default(), config, Utc);
        let view = controller.view();
        assert!(view
            .rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .all(|cell| cell.starts_at.is_none()));
        assert_eq!(view.alert, None);
        assert!(!view.submitting);
    }

    #[test]
    fn test_reconfigure_drops_slot_that_is_no_longer_offered() {
        let mut controller = controller(Appointment::default());
        controller.select_slot(at(2, 10, 30)).unwrap();

        controller.reconfigure(AppointmentFormConfig {
            available_time_slots: vec![TimeSlot::new(at(1, 9, 0))],
            ..config()
        });

        assert_eq!(controller.values().starts_at, None);
        assert!(controller.is_offerable(at(1, 9, 0)));
    }

    #[test]
    fn test_submit_event_is_intercepted() {
        let mut controller = FormController::new(Customer::default());
        controller
            .set_field(CustomerField::FirstName, FieldValue::text("Jamie"))
            .unwrap();
        let event = StubEvent::default();

        let pending = controller.handle_submit_event(&event).unwrap();

        assert!(event.prevented.get());
        assert!(controller.is_submitting());
        assert_eq!(pending.request().path, "/customers");
        let body: Value = serde_json::from_str(&pending.request().body).unwrap();
        assert_eq!(body["firstName"], json!("Jamie"));
    }

    #[test]
    fn test_failed_save_keeps_values_and_raises_alert() {
        let original = Customer {
            first_name: "Ashley".to_string(),
            ..Customer::default()
        };
        let mut controller = FormController::new(original.clone());

        let pending = controller.begin_submit().unwrap();
        let outcome = Ok(HttpResponse {
            status: 500,
            body: String::new(),
        });
        assert!(controller.complete_submit(pending, outcome).unwrap().is_err());

        assert_eq!(controller.values(), &original);
        assert_eq!(controller.alert(), Some(SAVE_ERROR_ALERT));
        assert!(!controller.is_submitting());
    }

    #[test]
    fn test_transport_failure_raises_alert_on_appointment_form() {
        let mut controller = controller(booked_with_ashley());
        let event = StubEvent::default();

        let pending = controller.handle_submit_event(&event).unwrap();
        assert!(controller.view().submitting);
        let outcome = Err(TransportError::Network("offline".to_string()));
        assert!(controller.complete_submit(pending, outcome).unwrap().is_err());

        assert_eq!(controller.view().alert, Some(SAVE_ERROR_ALERT));
        assert_eq!(controller.values(), &booked_with_ashley());
    }

    #[test]
    fn test_no_second_write_while_in_flight() {
        let mut controller = FormController::new(Customer::default());
        let event = StubEvent::default();

        let pending = controller.handle_submit_event(&event).unwrap();
        let second = controller.handle_submit_event(&event);

        assert_eq!(second.unwrap_err(), SubmissionError::AlreadyInFlight);
        assert!(controller.is_submitting());

        assert!(controller.complete_submit(pending, created("{}")).unwrap().is_ok());
        assert!(!controller.is_submitting());
        assert!(controller.handle_submit_event(&event).is_ok());
    }

    #[test]
    fn test_reset_discards_late_response() {
        let mut controller = FormController::new(Customer::default());

        let pending = controller.begin_submit().unwrap();
        let replacement = Customer {
            first_name: "Jordan".to_string(),
            ..Customer::default()
        };
        controller.reset(replacement.clone());

        assert!(controller.complete_submit(pending, created(r#"{"id": 5}"#)).is_none());
        assert_eq!(controller.values(), &replacement);
        assert_eq!(controller.fields().original(), &replacement);
        assert!(!controller.is_submitting());
        assert_eq!(controller.alert(), None);
    }

    #[test]
    fn test_shutdown_discards_late_response() {
        let mut controller = controller(booked_with_ashley());
        let event = StubEvent::default();
        let pending = controller.handle_submit_event(&event).unwrap();

        controller.form_mut().shutdown();

        let outcome = Err(TransportError::Network("aborted".to_string()));
        assert!(controller.complete_submit(pending, outcome).is_none());
        assert_eq!(controller.view().alert, None);
    }
}
