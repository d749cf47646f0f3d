use super::*;
use crate::services::property::Operation;

fn agency() -> AgencyRow {
    AgencyRow {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        name: "Inmobiliaria Turia".into(),
        description: None,
        phone: None,
        email: None,
        created_on: None,
    }
}

fn listing(agency: &AgencyRow, published: bool) -> PropertyRow {
    PropertyRow {
        id: Uuid::new_v4(),
        agency_id: agency.id,
        owner_id: agency.owner_id,
        title: "Chalet".into(),
        description: String::new(),
        price_cents: 1,
        operation: Operation::Sale,
        category_id: None,
        location_id: None,
        bedrooms: 0,
        bathrooms: 0,
        area_m2: 0.0,
        address: String::new(),
        image_urls: Vec::new(),
        published,
        listed_on: None,
    }
}

fn new_agency(name: &str) -> NewAgency {
    NewAgency { name: name.into(), description: None, phone: None, email: None }
}

#[test]
fn validate_accepts_named_agency() {
    assert!(new_agency("Casas del Sur").validate().is_ok());
}

#[test]
fn validate_rejects_blank_name() {
    assert!(matches!(new_agency("  ").validate(), Err(AgencyError::Invalid(_))));
}

#[test]
fn validate_rejects_long_name() {
    assert!(new_agency(&"a".repeat(MAX_NAME_LEN + 1)).validate().is_err());
}

#[test]
fn non_blank_drops_whitespace() {
    assert_eq!(non_blank(Some("  ")), None);
    assert_eq!(non_blank(Some(" 600 000 000 ")), Some("600 000 000"));
    assert_eq!(non_blank(None), None);
}

#[test]
fn dashboard_counts_published_and_drafts() {
    let agency = agency();
    let properties = vec![listing(&agency, true), listing(&agency, false), listing(&agency, true)];
    let dashboard = AgencyDashboard::new(agency, properties);
    assert_eq!(dashboard.published_count, 2);
    assert_eq!(dashboard.draft_count, 1);
}

#[test]
fn property_database_errors_stay_database_errors() {
    let err: AgencyError = PropertyError::Database(sqlx::Error::RowNotFound).into();
    assert!(matches!(err, AgencyError::Database(_)));
}
