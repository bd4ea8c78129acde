mod car;
mod schema;

pub use car::{Car, CarDraft, CarField, CarId, CarPatch, FieldKind, NewCar, format_rate};
pub use schema::{FieldErrors, car_schema, validate_draft};
