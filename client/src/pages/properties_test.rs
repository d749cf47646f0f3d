use super::*;

#[test]
fn empty_form_is_first_page_without_filters() {
    let search = SearchForm::default().to_search(0).expect("search");
    assert_eq!(search, PropertySearch { page: 1, ..PropertySearch::default() });
}

#[test]
fn filled_form_maps_every_field() {
    let form = SearchForm {
        q: "  ático ".into(),
        operation: "rent".into(),
        category_id: "c1".into(),
        location_id: " ".into(),
        min_price: "500".into(),
        max_price: "1.200".into(),
        min_bedrooms: "2".into(),
    };
    let search = form.to_search(3).expect("search");
    assert_eq!(search.q, "ático");
    assert_eq!(search.operation, Some(Operation::Rent));
    assert_eq!(search.category_id.as_deref(), Some("c1"));
    assert_eq!(search.location_id, None);
    assert_eq!(search.min_price_cents, Some(50_000));
    assert_eq!(search.max_price_cents, Some(120_000));
    assert_eq!(search.min_bedrooms, Some(2));
    assert_eq!(search.page, 3);
}

#[test]
fn unknown_operation_means_any() {
    let form = SearchForm { operation: "auction".into(), ..SearchForm::default() };
    assert_eq!(form.to_search(1).expect("search").operation, None);
}

#[test]
fn inverted_price_range_is_rejected() {
    let form = SearchForm { min_price: "900".into(), max_price: "100".into(), ..SearchForm::default() };
    assert_eq!(form.to_search(1), Err("Minimum price is above the maximum.".to_owned()));
}

#[test]
fn bad_numbers_are_rejected() {
    let form = SearchForm { min_price: "cheap".into(), ..SearchForm::default() };
    assert_eq!(form.to_search(1), Err("Minimum price must be a whole euro amount.".to_owned()));

    let form = SearchForm { min_bedrooms: "-1".into(), ..SearchForm::default() };
    assert_eq!(form.to_search(1), Err("Bedrooms must be a whole number.".to_owned()));
}

#[test]
fn location_label_resolves_known_ids() {
    let locations = vec![Location { id: "l1".into(), name: "Valencia".into(), province: "Valencia".into() }];
    assert_eq!(location_label(&locations, Some("l1")).as_deref(), Some("Valencia"));
    assert_eq!(location_label(&locations, Some("l2")), None);
    assert_eq!(location_label(&locations, None), None);
}
