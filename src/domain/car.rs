use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned identifier of a car record.
///
/// Stores are free to hand out numeric ids, so deserialization accepts both
/// JSON strings and numbers and keeps the textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CarId(String);

impl CarId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CarId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => CarId(text),
            RawId::Number(number) => CarId(number.to_string()),
        })
    }
}

/// A car record as the store last reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub name: String,
    pub model: String,
    pub daily_rate: f64,
    pub seats: u32,
    pub number_plate: String,
    pub image: String,
    pub brand: String,
    #[serde(default)]
    pub availability: bool,
}

impl Car {
    pub fn from_new(id: CarId, car: NewCar) -> Self {
        let NewCar {
            name,
            model,
            daily_rate,
            seats,
            number_plate,
            image,
            brand,
            availability,
        } = car;
        Self {
            id,
            name,
            model,
            daily_rate,
            seats,
            number_plate,
            image,
            brand,
            availability,
        }
    }

    pub fn rate_label(&self) -> String {
        format!("${}/Day", format_rate(self.daily_rate))
    }

    pub fn seats_label(&self) -> String {
        format!("{} Seats", self.seats)
    }

    pub fn availability_label(&self) -> &'static str {
        if self.availability {
            "Available"
        } else {
            "Not Available"
        }
    }

    /// Applies a partial update in place. The id never changes.
    pub fn apply(&mut self, patch: &CarPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(model) = &patch.model {
            self.model = model.clone();
        }
        if let Some(rate) = patch.daily_rate {
            self.daily_rate = rate;
        }
        if let Some(seats) = patch.seats {
            self.seats = seats;
        }
        if let Some(plate) = &patch.number_plate {
            self.number_plate = plate.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(brand) = &patch.brand {
            self.brand = brand.clone();
        }
        if let Some(flag) = patch.availability {
            self.availability = flag;
        }
    }
}

/// A validated record that has not been persisted yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCar {
    pub name: String,
    pub model: String,
    pub daily_rate: f64,
    pub seats: u32,
    pub number_plate: String,
    pub image: String,
    pub brand: String,
    pub availability: bool,
}

/// Changed fields of an update; absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
}

impl CarPatch {
    /// Collects the fields of `updated` that differ from `original`.
    pub fn between(original: &Car, updated: &NewCar) -> Self {
        fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
            (before != after).then(|| after.clone())
        }

        Self {
            name: changed(&original.name, &updated.name),
            model: changed(&original.model, &updated.model),
            daily_rate: changed(&original.daily_rate, &updated.daily_rate),
            seats: changed(&original.seats, &updated.seats),
            number_plate: changed(&original.number_plate, &updated.number_plate),
            image: changed(&original.image, &updated.image),
            brand: changed(&original.brand, &updated.brand),
            availability: changed(&original.availability, &updated.availability),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &CarPatch::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Bool,
}

/// Editable fields of a car record, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CarField {
    Name,
    Model,
    DailyRate,
    Seats,
    NumberPlate,
    Image,
    Brand,
    Availability,
}

impl CarField {
    pub const ALL: [CarField; 8] = [
        CarField::Name,
        CarField::Model,
        CarField::DailyRate,
        CarField::Seats,
        CarField::NumberPlate,
        CarField::Image,
        CarField::Brand,
        CarField::Availability,
    ];

    /// Wire name, also the JSON pointer segment used by the validation schema.
    pub fn key(self) -> &'static str {
        match self {
            CarField::Name => "name",
            CarField::Model => "model",
            CarField::DailyRate => "dailyRate",
            CarField::Seats => "seats",
            CarField::NumberPlate => "numberPlate",
            CarField::Image => "image",
            CarField::Brand => "brand",
            CarField::Availability => "availability",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        CarField::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            CarField::Name => "Car Name",
            CarField::Model => "Model",
            CarField::DailyRate => "Daily Rate",
            CarField::Seats => "Seats",
            CarField::NumberPlate => "Number Plate",
            CarField::Image => "Image URL",
            CarField::Brand => "Brand",
            CarField::Availability => "Availability",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            CarField::Name => "Enter car name",
            CarField::Model => "Enter car model",
            CarField::DailyRate => "Enter daily rate",
            CarField::Seats => "Enter number of seats",
            CarField::NumberPlate => "Enter number plate",
            CarField::Image => "Enter image URL",
            CarField::Brand => "Enter car brand",
            CarField::Availability => "",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            CarField::DailyRate => FieldKind::Number,
            CarField::Seats => FieldKind::Integer,
            CarField::Availability => FieldKind::Bool,
            _ => FieldKind::Text,
        }
    }
}

/// Raw, unvalidated form input. Numeric fields stay textual until coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarDraft {
    pub name: String,
    pub model: String,
    pub daily_rate: String,
    pub seats: String,
    pub number_plate: String,
    pub image: String,
    pub brand: String,
    pub availability: bool,
}

impl CarDraft {
    pub fn from_car(car: &Car) -> Self {
        Self {
            name: car.name.clone(),
            model: car.model.clone(),
            daily_rate: format_rate(car.daily_rate),
            seats: car.seats.to_string(),
            number_plate: car.number_plate.clone(),
            image: car.image.clone(),
            brand: car.brand.clone(),
            availability: car.availability,
        }
    }

    /// Text buffer backing `field`; `None` for the boolean field.
    pub fn text(&self, field: CarField) -> Option<&str> {
        let text = match field {
            CarField::Name => &self.name,
            CarField::Model => &self.model,
            CarField::DailyRate => &self.daily_rate,
            CarField::Seats => &self.seats,
            CarField::NumberPlate => &self.number_plate,
            CarField::Image => &self.image,
            CarField::Brand => &self.brand,
            CarField::Availability => return None,
        };
        Some(text.as_str())
    }

    pub fn text_mut(&mut self, field: CarField) -> Option<&mut String> {
        match field {
            CarField::Name => Some(&mut self.name),
            CarField::Model => Some(&mut self.model),
            CarField::DailyRate => Some(&mut self.daily_rate),
            CarField::Seats => Some(&mut self.seats),
            CarField::NumberPlate => Some(&mut self.number_plate),
            CarField::Image => Some(&mut self.image),
            CarField::Brand => Some(&mut self.brand),
            CarField::Availability => None,
        }
    }
}

/// Renders a rate without a trailing `.0` for whole amounts.
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 && rate.abs() < 1e15 {
        format!("{rate:.0}")
    } else {
        rate.to_string()
    }
}
