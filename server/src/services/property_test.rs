use super::*;

fn valid_new_property() -> NewProperty {
    serde_json::from_value(serde_json::json!({
        "title": "Piso luminoso en Ruzafa",
        "price_cents": 25_000_000,
        "operation": "sale",
        "bedrooms": 3,
        "bathrooms": 2,
        "area_m2": 95.5,
        "image_urls": ["https://cdn.example.com/a.jpg"]
    }))
    .expect("valid body")
}

// =============================================================================
// PropertyFilter paging
// =============================================================================

#[test]
fn filter_defaults_to_first_page() {
    let filter = PropertyFilter::default();
    assert_eq!(filter.page(), 1);
    assert_eq!(filter.per_page(), DEFAULT_PER_PAGE);
    assert_eq!(filter.offset(), 0);
}

#[test]
fn filter_clamps_per_page_and_page() {
    let filter = PropertyFilter { page: Some(0), per_page: Some(500), ..PropertyFilter::default() };
    assert_eq!(filter.page(), 1);
    assert_eq!(filter.per_page(), MAX_PER_PAGE);

    let filter = PropertyFilter { page: Some(-3), per_page: Some(0), ..PropertyFilter::default() };
    assert_eq!(filter.page(), 1);
    assert_eq!(filter.per_page(), 1);
}

#[test]
fn filter_offset_uses_page_size() {
    let filter = PropertyFilter { page: Some(3), per_page: Some(10), ..PropertyFilter::default() };
    assert_eq!(filter.offset(), 20);
}

#[test]
fn paging_alone_is_not_a_search() {
    let filter = PropertyFilter { page: Some(2), per_page: Some(5), ..PropertyFilter::default() };
    assert!(!filter.has_search_terms());
}

#[test]
fn blank_text_is_not_a_search() {
    let filter = PropertyFilter { q: Some("   ".into()), ..PropertyFilter::default() };
    assert!(!filter.has_search_terms());
}

#[test]
fn any_criterion_is_a_search() {
    assert!(PropertyFilter { q: Some("ático".into()), ..PropertyFilter::default() }.has_search_terms());
    assert!(PropertyFilter { operation: Some(Operation::Rent), ..PropertyFilter::default() }.has_search_terms());
    assert!(PropertyFilter { min_bedrooms: Some(2), ..PropertyFilter::default() }.has_search_terms());
    assert!(PropertyFilter { max_price: Some(1), ..PropertyFilter::default() }.has_search_terms());
}

#[test]
fn filter_deserializes_from_query_shape() {
    let filter: PropertyFilter = serde_json::from_value(serde_json::json!({
        "q": "valencia",
        "operation": "rent",
        "min_price": 50000
    }))
    .unwrap();
    assert_eq!(filter.operation, Some(Operation::Rent));
    assert_eq!(filter.min_price, Some(50000));
}

// =============================================================================
// SQL building
// =============================================================================

#[test]
fn escape_like_escapes_wildcards() {
    assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    assert_eq!(escape_like("plain"), "plain");
}

#[test]
fn conditions_hide_unpublished_for_members() {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM properties p");
    let viewer = Viewer { user_id: Uuid::nil(), is_admin: false };
    PropertyFilter::default().push_conditions(&mut builder, viewer);
    assert!(builder.sql().contains("p.published OR p.owner_id = $1"));
}

#[test]
fn conditions_skip_visibility_for_admins() {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM properties p");
    let viewer = Viewer { user_id: Uuid::nil(), is_admin: true };
    PropertyFilter::default().push_conditions(&mut builder, viewer);
    assert!(!builder.sql().contains("published"));
}

#[test]
fn conditions_bind_each_filter() {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM properties p");
    let viewer = Viewer { user_id: Uuid::nil(), is_admin: true };
    let filter = PropertyFilter {
        q: Some("playa".into()),
        operation: Some(Operation::Sale),
        min_price: Some(1),
        max_price: Some(2),
        ..PropertyFilter::default()
    };
    filter.push_conditions(&mut builder, viewer);
    let sql = builder.sql();
    assert!(sql.contains("p.title ILIKE $1"));
    assert!(sql.contains("p.address ILIKE $2"));
    assert!(sql.contains("p.operation = $3"));
    assert!(sql.contains("p.price_cents >= $4"));
    assert!(sql.contains("p.price_cents <= $5"));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn new_property_valid_passes() {
    assert!(valid_new_property().validate().is_ok());
}

#[test]
fn new_property_defaults_published() {
    assert!(valid_new_property().published);
}

#[test]
fn new_property_rejects_blank_title() {
    let input = NewProperty { title: "   ".into(), ..valid_new_property() };
    assert!(matches!(input.validate(), Err(PropertyError::Invalid(_))));
}

#[test]
fn new_property_rejects_long_title() {
    let input = NewProperty { title: "x".repeat(201), ..valid_new_property() };
    assert!(matches!(input.validate(), Err(PropertyError::Invalid(_))));
}

#[test]
fn new_property_rejects_negative_numbers() {
    assert!(NewProperty { price_cents: -1, ..valid_new_property() }.validate().is_err());
    assert!(NewProperty { area_m2: -0.5, ..valid_new_property() }.validate().is_err());
    assert!(NewProperty { area_m2: f64::NAN, ..valid_new_property() }.validate().is_err());
    assert!(NewProperty { bedrooms: -1, ..valid_new_property() }.validate().is_err());
}

#[test]
fn new_property_rejects_non_http_images() {
    let input = NewProperty { image_urls: vec!["ftp://x/y.jpg".into()], ..valid_new_property() };
    assert!(input.validate().is_err());
}

#[test]
fn new_property_rejects_unknown_operation() {
    let parsed: Result<NewProperty, _> = serde_json::from_value(serde_json::json!({
        "title": "t",
        "price_cents": 1,
        "operation": "swap"
    }));
    assert!(parsed.is_err());
}

#[test]
fn empty_patch_is_valid() {
    assert!(PropertyPatch::default().validate().is_ok());
}

#[test]
fn patch_validates_present_fields() {
    let patch = PropertyPatch { title: Some(String::new()), ..PropertyPatch::default() };
    assert!(patch.validate().is_err());
    let patch = PropertyPatch { price_cents: Some(-10), ..PropertyPatch::default() };
    assert!(patch.validate().is_err());
}

// =============================================================================
// Viewer
// =============================================================================

#[test]
fn owner_and_admin_may_modify() {
    let owner = Uuid::new_v4();
    assert!(Viewer { user_id: owner, is_admin: false }.may_modify(owner));
    assert!(Viewer { user_id: Uuid::new_v4(), is_admin: true }.may_modify(owner));
    assert!(!Viewer { user_id: Uuid::new_v4(), is_admin: false }.may_modify(owner));
}

#[test]
fn operation_round_trips_names() {
    for op in [Operation::Sale, Operation::Rent] {
        assert_eq!(Operation::parse(op.as_str()), Some(op));
    }
    assert_eq!(Operation::parse("lease"), None);
}
