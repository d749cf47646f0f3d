use super::*;

fn filled() -> PropertyForm {
    PropertyForm {
        title: " Piso luminoso ".into(),
        description: "Tercera planta".into(),
        price: "250.000".into(),
        operation: "sale".into(),
        category_id: "c1".into(),
        location_id: String::new(),
        bedrooms: "3".into(),
        bathrooms: String::new(),
        area: "92,5".into(),
        address: "Calle Mayor 1".into(),
        image_urls: "https://img.example/1.jpg\n\n https://img.example/2.jpg ".into(),
        draft: false,
    }
}

#[test]
fn valid_form_builds_request() {
    let body = filled().to_new_property().expect("valid");
    assert_eq!(body.title, "Piso luminoso");
    assert_eq!(body.price_cents, 25_000_000);
    assert_eq!(body.operation, Operation::Sale);
    assert_eq!(body.category_id.as_deref(), Some("c1"));
    assert_eq!(body.location_id, None);
    assert_eq!(body.bedrooms, 3);
    assert_eq!(body.bathrooms, 0);
    assert!((body.area_m2 - 92.5).abs() < f64::EPSILON);
    assert_eq!(body.image_urls, vec!["https://img.example/1.jpg", "https://img.example/2.jpg"]);
    assert!(body.published);
}

#[test]
fn draft_checkbox_unpublishes() {
    let form = PropertyForm { draft: true, ..filled() };
    assert!(!form.to_new_property().expect("valid").published);
}

#[test]
fn title_is_required_and_bounded() {
    let blank = PropertyForm { title: "   ".into(), ..filled() };
    assert_eq!(blank.to_new_property(), Err("Title is required.".to_owned()));

    let long = PropertyForm { title: "x".repeat(201), ..filled() };
    assert_eq!(long.to_new_property(), Err("Title must be at most 200 characters.".to_owned()));
}

#[test]
fn price_must_parse() {
    let form = PropertyForm { price: "a lot".into(), ..filled() };
    assert_eq!(form.to_new_property(), Err("Price must be a whole euro amount.".to_owned()));
}

#[test]
fn negative_counts_and_area_are_rejected() {
    let form = PropertyForm { bedrooms: "-2".into(), ..filled() };
    assert_eq!(form.to_new_property(), Err("Bedrooms must be a whole number.".to_owned()));

    let form = PropertyForm { area: "-10".into(), ..filled() };
    assert_eq!(form.to_new_property(), Err("Area must be a positive number.".to_owned()));
}

#[test]
fn missing_operation_defaults_to_sale() {
    let form = PropertyForm { operation: String::new(), ..filled() };
    assert_eq!(form.to_new_property().expect("valid").operation, Operation::Sale);
}
