use crossterm::event::KeyEvent;

use crate::domain::{
    Car, CarDraft, CarField, CarId, CarPatch, FieldErrors, FieldKind, NewCar, validate_draft,
};

use super::input::{handle_bool_edit, handle_text_edit};

#[derive(Debug, Clone)]
pub enum FormMode {
    Add,
    Update { original: Car },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

/// What a valid submission asks the store to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitIntent {
    Create(NewCar),
    Update { id: CarId, patch: CarPatch },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed; the form is now `Submitting`.
    Ready(SubmitIntent),
    /// Validation failed with this many field errors.
    Invalid(usize),
    /// An update without any changed field.
    Unchanged,
    /// A submission is already in flight.
    Busy,
}

/// Draft values, per-field errors and focus of one add/update form.
#[derive(Debug, Clone)]
pub struct FormController {
    mode: FormMode,
    draft: CarDraft,
    initial: CarDraft,
    errors: FieldErrors,
    focus: usize,
    phase: FormPhase,
}

impl FormController {
    pub fn for_add() -> Self {
        Self::with_draft(FormMode::Add, CarDraft::default())
    }

    pub fn for_update(car: &Car) -> Self {
        Self::with_draft(
            FormMode::Update {
                original: car.clone(),
            },
            CarDraft::from_car(car),
        )
    }

    fn with_draft(mode: FormMode, draft: CarDraft) -> Self {
        Self {
            mode,
            initial: draft.clone(),
            draft,
            errors: FieldErrors::new(),
            focus: 0,
            phase: FormPhase::Editing,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Car",
            FormMode::Update { .. } => "Update Car",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add Car",
            FormMode::Update { .. } => "Update Car",
        }
    }

    pub fn target_id(&self) -> Option<&CarId> {
        match &self.mode {
            FormMode::Add => None,
            FormMode::Update { original } => Some(&original.id),
        }
    }

    pub fn draft(&self) -> &CarDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.initial
    }

    pub fn focused_field(&self) -> CarField {
        CarField::ALL[self.focus]
    }

    pub fn focus_step(&mut self, delta: i32) {
        let len = CarField::ALL.len() as i32;
        self.focus = (self.focus as i32 + delta).rem_euclid(len) as usize;
    }

    pub fn focus(&mut self, field: CarField) {
        if let Some(index) = CarField::ALL.iter().position(|candidate| *candidate == field) {
            self.focus = index;
        }
    }

    /// Routes an editing key to the focused field. Ignored while submitting.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.is_submitting() {
            return false;
        }
        let field = self.focused_field();
        let changed = match field.kind() {
            FieldKind::Bool => handle_bool_edit(&mut self.draft.availability, key),
            kind => match self.draft.text_mut(field) {
                Some(buffer) => handle_text_edit(buffer, kind, key),
                None => false,
            },
        };
        if changed {
            self.errors.remove(field);
        }
        changed
    }

    pub fn set_text(&mut self, field: CarField, value: impl Into<String>) -> bool {
        if self.is_submitting() {
            return false;
        }
        let Some(buffer) = self.draft.text_mut(field) else {
            return false;
        };
        *buffer = value.into();
        self.errors.remove(field);
        true
    }

    pub fn set_availability(&mut self, available: bool) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.draft.availability = available;
        true
    }

    /// Validates the draft and, when it passes, moves to `Submitting`.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_submitting() {
            return SubmitOutcome::Busy;
        }
        let car = match validate_draft(&self.draft) {
            Ok(car) => car,
            Err(errors) => {
                let count = errors.len();
                if let Some((field, _)) = errors.iter().next() {
                    self.focus(field);
                }
                self.errors = errors;
                return SubmitOutcome::Invalid(count);
            }
        };
        self.errors.clear();

        let intent = match &self.mode {
            FormMode::Add => SubmitIntent::Create(car),
            FormMode::Update { original } => {
                let patch = CarPatch::between(original, &car);
                if patch.is_empty() {
                    return SubmitOutcome::Unchanged;
                }
                SubmitIntent::Update {
                    id: original.id.clone(),
                    patch,
                }
            }
        };
        self.phase = FormPhase::Submitting;
        SubmitOutcome::Ready(intent)
    }

    /// Returns to editing after a failed request; the draft is kept for a retry.
    pub fn finish_failed(&mut self) {
        self.phase = FormPhase::Editing;
    }
}
