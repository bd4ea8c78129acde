use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    domain::{CarField, CarPatch},
    form::{FormController, FormPhase, SubmitIntent, SubmitOutcome},
    tests::sample_car,
};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn filled_add_form() -> FormController {
    let mut form = FormController::for_add();
    form.set_text(CarField::Name, "Roadster");
    form.set_text(CarField::Model, "X");
    form.set_text(CarField::DailyRate, "10");
    form.set_text(CarField::Seats, "4");
    form.set_text(CarField::NumberPlate, "P1");
    form.set_text(CarField::Image, "http://x/y.png");
    form.set_text(CarField::Brand, "B");
    form
}

#[test]
fn empty_name_is_the_only_error_and_gets_focus() {
    let mut form = filled_add_form();
    form.set_text(CarField::Name, "");
    form.focus(CarField::Brand);

    assert_eq!(form.submit(), SubmitOutcome::Invalid(1));
    assert_eq!(form.errors().get(CarField::Name), Some("Car Name is required"));
    assert_eq!(form.focused_field(), CarField::Name);
    assert_eq!(form.phase(), FormPhase::Editing);
}

#[test]
fn blank_add_form_reports_every_required_field() {
    let mut form = FormController::for_add();
    assert_eq!(form.submit(), SubmitOutcome::Invalid(7));
    assert!(form.errors().get(CarField::Availability).is_none());
}

#[test]
fn editing_a_field_clears_its_error() {
    let mut form = filled_add_form();
    form.set_text(CarField::Seats, "many");
    assert_eq!(form.submit(), SubmitOutcome::Invalid(1));
    assert_eq!(form.focused_field(), CarField::Seats);

    form.handle_key(&key(KeyCode::Delete));
    assert!(form.errors().is_empty());
    form.handle_key(&key(KeyCode::Char('2')));
    assert_eq!(form.draft().seats, "2");
}

#[test]
fn valid_add_enters_submitting_and_rejects_a_second_submit() {
    let mut form = filled_add_form();
    let outcome = form.submit();
    let SubmitOutcome::Ready(SubmitIntent::Create(car)) = outcome else {
        panic!("expected create intent, got {outcome:?}");
    };
    assert_eq!(car.name, "Roadster");
    assert_eq!(car.daily_rate, 10.0);
    assert_eq!(car.seats, 4);
    assert!(form.is_submitting());

    assert_eq!(form.submit(), SubmitOutcome::Busy);
    assert!(!form.handle_key(&key(KeyCode::Char('z'))));
    assert_eq!(form.draft().name, "Roadster");
}

#[test]
fn failed_request_returns_to_editing_with_draft_intact() {
    let mut form = filled_add_form();
    assert!(matches!(form.submit(), SubmitOutcome::Ready(_)));
    form.finish_failed();
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.draft().brand, "B");
    assert!(matches!(form.submit(), SubmitOutcome::Ready(_)));
}

#[test]
fn update_form_starts_from_the_record() {
    let car = sample_car("7", "Coupe", true);
    let form = FormController::for_update(&car);
    assert_eq!(form.title(), "Update Car");
    assert_eq!(form.submit_label(), "Update Car");
    assert_eq!(form.target_id(), Some(&car.id));
    assert_eq!(form.draft().daily_rate, "45");
    assert!(form.draft().availability);
    assert!(!form.is_dirty());
}

#[test]
fn untouched_update_is_unchanged() {
    let mut form = FormController::for_update(&sample_car("7", "Coupe", true));
    assert_eq!(form.submit(), SubmitOutcome::Unchanged);
    assert_eq!(form.phase(), FormPhase::Editing);
}

#[test]
fn update_sends_only_changed_fields() {
    let car = sample_car("7", "Coupe", true);
    let mut form = FormController::for_update(&car);
    form.set_text(CarField::DailyRate, "60.5");
    form.set_availability(false);
    assert!(form.is_dirty());

    let expected = CarPatch {
        daily_rate: Some(60.5),
        availability: Some(false),
        ..CarPatch::default()
    };
    assert_eq!(
        form.submit(),
        SubmitOutcome::Ready(SubmitIntent::Update {
            id: car.id.clone(),
            patch: expected,
        })
    );
}

#[test]
fn focus_wraps_in_both_directions() {
    let mut form = FormController::for_add();
    assert_eq!(form.focused_field(), CarField::Name);
    form.focus_step(-1);
    assert_eq!(form.focused_field(), CarField::Availability);
    form.focus_step(1);
    assert_eq!(form.focused_field(), CarField::Name);
}

#[test]
fn availability_toggles_with_space() {
    let mut form = FormController::for_add();
    form.focus(CarField::Availability);
    assert!(form.handle_key(&key(KeyCode::Char(' '))));
    assert!(form.draft().availability);
}
