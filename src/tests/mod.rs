use crate::domain::{Car, CarId};

mod app;
mod form;
mod presentation;

pub(crate) fn sample_car(id: &str, name: &str, available: bool) -> Car {
    Car {
        id: CarId::new(id),
        name: name.to_string(),
        model: "Sport".to_string(),
        daily_rate: 45.0,
        seats: 4,
        number_plate: format!("WD-{id}"),
        image: format!("https://cdn.example.com/{id}.png"),
        brand: "Audi".to_string(),
        availability: available,
    }
}
