use std::collections::BTreeMap;
use std::sync::LazyLock;

use jsonschema::Validator;
use serde_json::{Map, Number, Value, json};

use super::car::{CarDraft, CarField, FieldKind, NewCar};

static CAR_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Car",
        "type": "object",
        "required": [
            "name", "model", "dailyRate", "seats",
            "numberPlate", "image", "brand", "availability"
        ],
        "properties": {
            "name": { "type": "string", "minLength": 1 },
            "model": { "type": "string", "minLength": 1 },
            "dailyRate": { "type": "number", "exclusiveMinimum": 0 },
            "seats": { "type": "integer", "minimum": 1, "maximum": u32::MAX },
            "numberPlate": { "type": "string", "minLength": 1 },
            "image": { "type": "string", "minLength": 1, "format": "uri" },
            "brand": { "type": "string", "minLength": 1 },
            "availability": { "type": "boolean" }
        }
    })
});

static CAR_VALIDATOR: LazyLock<Validator> = LazyLock::new(|| {
    jsonschema::options()
        .should_validate_formats(true)
        .build(&CAR_SCHEMA)
        .expect("built-in car schema must compile")
});

/// Message per (field, failing keyword). Order decides which message wins
/// when a field violates several keywords at once.
const MESSAGES: &[(CarField, &str, &str)] = &[
    (CarField::Name, "minLength", "Car Name is required"),
    (CarField::Model, "minLength", "Model is required"),
    (CarField::DailyRate, "exclusiveMinimum", "Daily Rate must be greater than 0"),
    (CarField::DailyRate, "type", "Daily Rate must be a number"),
    (CarField::Seats, "type", "Seats must be a whole number"),
    (CarField::Seats, "minimum", "Seats must be greater than 0"),
    (CarField::Seats, "maximum", "Seats must be a whole number"),
    (CarField::NumberPlate, "minLength", "Number Plate is required"),
    (CarField::Image, "minLength", "Image URL is required"),
    (CarField::Image, "format", "Invalid image URL"),
    (CarField::Brand, "minLength", "Brand is required"),
];

/// The JSON Schema every car record is validated against.
pub fn car_schema() -> &'static Value {
    &CAR_SCHEMA
}

/// Field name to message, at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<CarField, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless `field` already has one.
    pub fn insert(&mut self, field: CarField, message: impl Into<String>) -> bool {
        if self.entries.contains_key(&field) {
            return false;
        }
        self.entries.insert(field, message.into());
        true
    }

    pub fn remove(&mut self, field: CarField) -> Option<String> {
        self.entries.remove(&field)
    }

    pub fn get(&self, field: CarField) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (CarField, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

/// Coerces the draft and checks it against the car schema.
///
/// Every failing field is reported; nothing here panics on bad input.
pub fn validate_draft(draft: &CarDraft) -> Result<NewCar, FieldErrors> {
    let mut errors = FieldErrors::new();
    let instance = coerce_draft(draft, &mut errors);

    for error in CAR_VALIDATOR.iter_errors(&instance) {
        let pointer = error.instance_path.to_string();
        let Some(field) = CarField::from_key(pointer.trim_start_matches('/')) else {
            tracing::warn!(%pointer, %error, "schema violation outside a known field");
            continue;
        };
        let schema_path = error.schema_path.to_string();
        let keyword = schema_path.rsplit('/').next().unwrap_or_default();
        collect_violation(&mut errors, field, keyword);
    }

    let seats = whole_seats(&instance["seats"]);
    if seats.is_none() {
        errors.insert(CarField::Seats, "Seats must be a whole number");
    }

    if !errors.is_empty() {
        tracing::debug!(issues = errors.len(), "car draft rejected");
        return Err(errors);
    }

    Ok(NewCar {
        name: draft.name.clone(),
        model: draft.model.clone(),
        daily_rate: instance["dailyRate"].as_f64().unwrap_or_default(),
        seats: seats.unwrap_or_default(),
        number_plate: draft.number_plate.clone(),
        image: draft.image.clone(),
        brand: draft.brand.clone(),
        availability: draft.availability,
    })
}

/// Seat count as stored; `None` unless the value is a whole number in range.
fn whole_seats(value: &Value) -> Option<u32> {
    if let Some(whole) = value.as_u64() {
        return u32::try_from(whole).ok();
    }
    let float = value.as_f64()?;
    let in_range = (0.0..=f64::from(u32::MAX)).contains(&float);
    (in_range && float.fract() == 0.0).then_some(float as u32)
}

fn collect_violation(errors: &mut FieldErrors, field: CarField, keyword: &str) {
    if errors.get(field).is_some() {
        return;
    }
    // Keep the highest-priority message when one field breaks several keywords.
    let ranked = MESSAGES
        .iter()
        .position(|(candidate, kw, _)| *candidate == field && *kw == keyword);
    let fallback = MESSAGES.iter().position(|(candidate, _, _)| *candidate == field);
    if let Some(index) = ranked.or(fallback) {
        errors.insert(field, MESSAGES[index].2);
    }
}

/// Builds the JSON instance for the schema, parsing numeric text first.
/// Parse failures are reported immediately and the field is sent as `null`.
fn coerce_draft(draft: &CarDraft, errors: &mut FieldErrors) -> Value {
    let mut object = Map::new();
    for field in CarField::ALL {
        let value = match field.kind() {
            FieldKind::Bool => Value::Bool(draft.availability),
            FieldKind::Text => Value::String(draft.text(field).unwrap_or_default().to_string()),
            FieldKind::Number | FieldKind::Integer => {
                match coerce_number(field, draft.text(field).unwrap_or_default()) {
                    Ok(number) => Value::Number(number),
                    Err(message) => {
                        errors.insert(field, message);
                        Value::Null
                    }
                }
            }
        };
        object.insert(field.key().to_string(), value);
    }
    Value::Object(object)
}

fn coerce_number(field: CarField, raw: &str) -> Result<Number, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(match field {
            CarField::Seats => "Seats are required",
            _ => "Daily Rate is required",
        });
    }
    let parsed = trimmed.parse::<f64>().ok().and_then(Number::from_f64);
    let Some(number) = parsed else {
        return Err(match field {
            CarField::Seats => "Seats must be a whole number",
            _ => "Daily Rate must be a number",
        });
    };
    if field.kind() == FieldKind::Integer
        && let Ok(whole) = trimmed.parse::<i64>()
    {
        return Ok(Number::from(whole));
    }
    Ok(number)
}
