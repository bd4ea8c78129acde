use wheeldeal::domain::{CarDraft, CarField, car_schema, validate_draft};

fn valid_draft() -> CarDraft {
    CarDraft {
        name: "Roadster".into(),
        model: "X".into(),
        daily_rate: "10".into(),
        seats: "4".into(),
        number_plate: "P1".into(),
        image: "http://x/y.png".into(),
        brand: "B".into(),
        availability: false,
    }
}

#[test]
fn empty_name_yields_exactly_one_error() {
    let draft = CarDraft {
        name: String::new(),
        ..valid_draft()
    };
    let errors = validate_draft(&draft).expect_err("invalid");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(CarField::Name), Some("Car Name is required"));
}

#[test]
fn every_required_string_is_checked() {
    let cases = [
        (CarField::Model, "Model is required"),
        (CarField::NumberPlate, "Number Plate is required"),
        (CarField::Image, "Image URL is required"),
        (CarField::Brand, "Brand is required"),
    ];
    for (field, message) in cases {
        let mut draft = valid_draft();
        draft.text_mut(field).expect("text field").clear();
        let errors = validate_draft(&draft).expect_err("invalid");
        assert_eq!(errors.len(), 1, "{field:?}");
        assert_eq!(errors.get(field), Some(message));
    }
}

#[test]
fn whitespace_counts_as_content() {
    let draft = CarDraft {
        brand: " ".into(),
        ..valid_draft()
    };
    assert!(validate_draft(&draft).is_ok());
}

#[test]
fn numbers_are_parsed_before_range_checks() {
    let draft = CarDraft {
        daily_rate: "cheap".into(),
        seats: String::new(),
        ..valid_draft()
    };
    let errors = validate_draft(&draft).expect_err("invalid");
    assert_eq!(errors.get(CarField::DailyRate), Some("Daily Rate must be a number"));
    assert_eq!(errors.get(CarField::Seats), Some("Seats are required"));
}

#[test]
fn empty_numbers_are_reported_as_required() {
    let draft = CarDraft {
        daily_rate: "  ".into(),
        seats: String::new(),
        ..valid_draft()
    };
    let errors = validate_draft(&draft).expect_err("invalid");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(CarField::DailyRate), Some("Daily Rate is required"));
    assert_eq!(errors.get(CarField::Seats), Some("Seats are required"));
}

#[test]
fn seats_that_are_not_whole_numbers_are_rejected() {
    for raw in ["abc", "2.5", "5000000000"] {
        let draft = CarDraft {
            seats: raw.into(),
            ..valid_draft()
        };
        let errors = validate_draft(&draft).expect_err("invalid");
        assert_eq!(errors.len(), 1, "{raw}");
        assert_eq!(
            errors.get(CarField::Seats),
            Some("Seats must be a whole number"),
            "{raw}"
        );
    }
}

#[test]
fn non_positive_rate_and_seats_are_rejected() {
    let draft = CarDraft {
        daily_rate: "0".into(),
        seats: "-2".into(),
        ..valid_draft()
    };
    let errors = validate_draft(&draft).expect_err("invalid");
    assert_eq!(
        errors.get(CarField::DailyRate),
        Some("Daily Rate must be greater than 0")
    );
    assert_eq!(errors.get(CarField::Seats), Some("Seats must be greater than 0"));
}

#[test]
fn malformed_image_fails_regardless_of_other_fields() {
    let draft = CarDraft {
        image: "not a url".into(),
        ..valid_draft()
    };
    let errors = validate_draft(&draft).expect_err("invalid");
    assert_eq!(errors.get(CarField::Image), Some("Invalid image URL"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn valid_draft_is_coerced() {
    let car = validate_draft(&CarDraft {
        daily_rate: " 45.5 ".into(),
        ..valid_draft()
    })
    .expect("valid");
    assert_eq!(car.daily_rate, 45.5);
    assert_eq!(car.seats, 4);
    assert!(!car.availability);
}

#[test]
fn schema_requires_every_field() {
    let required = car_schema()["required"].as_array().expect("required");
    assert_eq!(required.len(), CarField::ALL.len());
    for field in CarField::ALL {
        assert!(required.iter().any(|key| *key == field.key()));
    }
}
