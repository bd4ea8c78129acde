use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    app::{App, ConsoleMode, KeymapContext, UiOptions},
    domain::{Car, CarField, CarId, CarPatch, NewCar},
    listing::{AvailabilityFilter, LoadState, ViewMode},
    store::{CarStore, MemoryCarStore, StoreError},
    tests::sample_car,
};

const SETTLE: Duration = Duration::from_millis(300);

fn press(app: &mut App, code: KeyCode) {
    app.handle_key_for_test(KeyEvent::new(code, KeyModifiers::NONE));
}

fn loaded(store: Arc<dyn CarStore>, mode: ConsoleMode) -> App {
    let mut app = App::with_store(store, mode);
    app.refresh_for_test();
    app.settle_for_test(SETTLE);
    app
}

fn fleet() -> Arc<MemoryCarStore> {
    Arc::new(MemoryCarStore::with_cars(vec![
        sample_car("1", "Roadster", true),
        sample_car("2", "Wagon", false),
    ]))
}

fn fill_form(app: &mut App) {
    let popup = app.popup_mut().form_popup_mut().expect("form popup");
    for (field, value) in [
        (CarField::Name, "Hatchback"),
        (CarField::Model, "GTI"),
        (CarField::DailyRate, "30"),
        (CarField::Seats, "5"),
        (CarField::NumberPlate, "HB-9"),
        (CarField::Image, "https://cdn.example.com/hb.png"),
        (CarField::Brand, "VW"),
    ] {
        popup.form.set_text(field, value);
    }
}

/// Lists normally; every mutation is rejected with the given status.
struct RejectingStore {
    cars: Vec<Car>,
    status: u16,
}

impl CarStore for RejectingStore {
    fn list(&self) -> Result<Vec<Car>, StoreError> {
        Ok(self.cars.clone())
    }

    fn create(&self, _car: &NewCar) -> Result<Car, StoreError> {
        Err(self.rejection())
    }

    fn update(&self, _id: &CarId, _patch: &CarPatch) -> Result<(), StoreError> {
        Err(self.rejection())
    }

    fn delete(&self, _id: &CarId) -> Result<(), StoreError> {
        Err(self.rejection())
    }
}

impl RejectingStore {
    fn rejection(&self) -> StoreError {
        match self.status {
            401 | 403 => StoreError::Unauthorized(self.status),
            status => StoreError::Status(status),
        }
    }
}

struct OfflineStore;

impl CarStore for OfflineStore {
    fn list(&self) -> Result<Vec<Car>, StoreError> {
        Err(StoreError::Transport("connection refused".into()))
    }

    fn create(&self, _car: &NewCar) -> Result<Car, StoreError> {
        Err(StoreError::Transport("connection refused".into()))
    }

    fn update(&self, _id: &CarId, _patch: &CarPatch) -> Result<(), StoreError> {
        Err(StoreError::Transport("connection refused".into()))
    }

    fn delete(&self, _id: &CarId) -> Result<(), StoreError> {
        Err(StoreError::Transport("connection refused".into()))
    }
}

#[test]
fn initial_refresh_populates_the_listing() {
    let app = loaded(fleet(), ConsoleMode::Admin);
    assert_eq!(app.listing().state(), &LoadState::Ready);
    assert_eq!(app.listing().cars().len(), 2);
    assert_eq!(app.status_message(), "Ready.");
}

#[test]
fn failed_initial_load_shows_the_error_in_place_of_cars() {
    let app = loaded(Arc::new(OfflineStore), ConsoleMode::Admin);
    let LoadState::Failed(message) = app.listing().state() else {
        panic!("expected failed load");
    };
    assert!(message.starts_with("Failed to fetch car data."));
    assert_eq!(app.toast().map(|toast| toast.title.as_str()), Some("Error"));
}

#[test]
fn toast_lifetime_follows_the_options() {
    let short = UiOptions::default().with_toast_duration(Duration::ZERO);
    let mut app = App::with_options(Arc::new(OfflineStore), ConsoleMode::Admin, short);
    app.refresh_for_test();
    app.settle_for_test(SETTLE);
    assert!(app.toast().is_some());
    app.expire_toast_for_test(Instant::now());
    assert!(app.toast().is_none());

    let mut app = loaded(Arc::new(OfflineStore), ConsoleMode::Admin);
    app.expire_toast_for_test(Instant::now());
    assert!(app.toast().is_some(), "default lifetime outlives the test");
}

#[test]
fn add_flow_creates_once_and_refreshes() {
    let store = fleet();
    let mut app = loaded(store.clone(), ConsoleMode::Admin);

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.popup().context(), KeymapContext::Form);
    fill_form(&mut app);
    press(&mut app, KeyCode::Enter);
    // A second Enter while the request is in flight is ignored.
    press(&mut app, KeyCode::Enter);
    app.settle_for_test(SETTLE);

    assert!(!app.popup().is_open());
    assert_eq!(
        app.toast().map(|toast| toast.title.as_str()),
        Some("Car Added Successfully!")
    );
    let matching = app
        .listing()
        .cars()
        .iter()
        .filter(|car| car.name == "Hatchback")
        .count();
    assert_eq!(matching, 1);
    assert_eq!(store.snapshot().len(), 3);
    assert_eq!(store.snapshot()[2].id, CarId::new("3"));
}

#[test]
fn invalid_submit_keeps_the_form_open_and_calls_nothing() {
    let store = fleet();
    let mut app = loaded(store.clone(), ConsoleMode::Admin);

    press(&mut app, KeyCode::Char('a'));
    fill_form(&mut app);
    app.popup_mut()
        .form_popup_mut()
        .expect("form popup")
        .form
        .set_text(CarField::Name, "");
    press(&mut app, KeyCode::Enter);
    app.settle_for_test(SETTLE);

    assert!(app.popup().is_open());
    assert_eq!(app.status_message(), "1 issue(s) remaining");
    let form = app.popup().form().expect("form");
    assert_eq!(form.errors().get(CarField::Name), Some("Car Name is required"));
    assert!(app.toast().is_none());
    assert_eq!(store.snapshot().len(), 2);
}

#[test]
fn update_flow_patches_the_selected_car() {
    let store = fleet();
    let mut app = loaded(store.clone(), ConsoleMode::Admin);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    let popup = app.popup_mut().form_popup_mut().expect("update popup");
    assert_eq!(popup.form.target_id(), Some(&CarId::new("2")));
    popup.form.set_text(CarField::DailyRate, "99");
    press(&mut app, KeyCode::Enter);
    app.settle_for_test(SETTLE);

    assert_eq!(
        app.toast().map(|toast| toast.title.as_str()),
        Some("Car Updated Successfully!")
    );
    let updated = store
        .snapshot()
        .into_iter()
        .find(|car| car.id == CarId::new("2"))
        .expect("car 2");
    assert_eq!(updated.daily_rate, 99.0);
    assert_eq!(updated.name, "Wagon");
}

#[test]
fn unchanged_update_closes_without_a_request() {
    let mut app = loaded(fleet(), ConsoleMode::Admin);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    app.settle_for_test(SETTLE);

    assert!(!app.popup().is_open());
    assert_eq!(app.status_message(), "No changes to save.");
    assert!(app.toast().is_none());
}

#[test]
fn delete_flow_removes_the_car() {
    let store = fleet();
    let mut app = loaded(store.clone(), ConsoleMode::Admin);

    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.popup().context(), KeymapContext::Confirm);
    press(&mut app, KeyCode::Char('y'));
    app.settle_for_test(SETTLE);

    assert_eq!(
        app.toast().map(|toast| toast.title.as_str()),
        Some("Car Deleted Successfully!")
    );
    assert!(
        app.listing()
            .cars()
            .iter()
            .all(|car| car.id != CarId::new("1"))
    );
    assert_eq!(store.snapshot().len(), 1);
}

#[test]
fn keeping_the_car_closes_the_confirmation() {
    let store = fleet();
    let mut app = loaded(store.clone(), ConsoleMode::Admin);
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('n'));
    app.settle_for_test(SETTLE);
    assert!(!app.popup().is_open());
    assert_eq!(store.snapshot().len(), 2);
}

#[test]
fn cancelled_delete_completion_is_discarded() {
    let store = fleet();
    let mut app = loaded(store.clone(), ConsoleMode::Admin);

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    press(&mut app, KeyCode::Esc);
    app.settle_for_test(SETTLE);

    assert!(!app.popup().is_open());
    assert!(app.toast().is_none());
    // No refresh was triggered, so the listing still shows the old record.
    assert_eq!(app.listing().cars().len(), 2);
}

#[test]
fn rejected_update_keeps_the_draft_for_a_retry() {
    let store = Arc::new(RejectingStore {
        cars: vec![sample_car("1", "Roadster", true)],
        status: 500,
    });
    let mut app = loaded(store, ConsoleMode::Admin);

    press(&mut app, KeyCode::Enter);
    app.popup_mut()
        .form_popup_mut()
        .expect("update popup")
        .form
        .set_text(CarField::Brand, "Porsche");
    press(&mut app, KeyCode::Enter);
    app.settle_for_test(SETTLE);

    let toast = app.toast().expect("toast");
    assert_eq!(toast.title, "Error Updating Car");
    assert_eq!(toast.description, "There was an issue updating the car.");
    let form = app.popup().form().expect("form stays open");
    assert!(!form.is_submitting());
    assert_eq!(form.draft().brand, "Porsche");
}

#[test]
fn unauthorized_mutation_reports_access_denied() {
    let store = Arc::new(RejectingStore {
        cars: vec![sample_car("1", "Roadster", true)],
        status: 401,
    });
    let mut app = loaded(store, ConsoleMode::Admin);
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Enter);
    app.settle_for_test(SETTLE);

    assert_eq!(
        app.toast().map(|toast| toast.title.as_str()),
        Some("Access Denied")
    );
    assert!(app.popup().is_open());
}

#[test]
fn public_mode_ignores_mutation_keys() {
    let store = fleet();
    let mut app = loaded(store, ConsoleMode::Public);
    for code in [KeyCode::Char('a'), KeyCode::Enter, KeyCode::Char('d')] {
        press(&mut app, code);
        assert!(!app.popup().is_open());
    }
}

#[test]
fn filter_and_view_toggle_from_the_listing() {
    let mut app = loaded(fleet(), ConsoleMode::Admin);

    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.listing().filter(), AvailabilityFilter::Available);
    assert_eq!(app.listing().visible_len(), 1);
    press(&mut app, KeyCode::Char('f'));
    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.listing().filter(), AvailabilityFilter::All);
    assert_eq!(app.listing().visible_len(), 2);

    assert_eq!(app.view(), ViewMode::Cards);
    press(&mut app, KeyCode::Char('v'));
    assert_eq!(app.view(), ViewMode::Table);
}

#[test]
fn q_quits_from_the_listing_but_types_in_the_form() {
    let mut app = loaded(fleet(), ConsoleMode::Admin);
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit());
    assert_eq!(app.popup().form().expect("form").draft().name, "q");

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}
