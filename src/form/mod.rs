mod controller;
mod input;

pub use controller::{FormController, FormMode, FormPhase, SubmitIntent, SubmitOutcome};
