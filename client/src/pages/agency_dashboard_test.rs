use super::*;

#[test]
fn agency_name_is_required() {
    assert_eq!(new_agency("  ", "", "", ""), Err("Agency name is required."));
}

#[test]
fn blank_optional_fields_become_none() {
    let body = new_agency(" Casas Levante ", " ", "info@levante.es", "").expect("valid");
    assert_eq!(body.name, "Casas Levante");
    assert_eq!(body.phone, None);
    assert_eq!(body.email.as_deref(), Some("info@levante.es"));
    assert_eq!(body.description, None);
}

#[test]
fn counts_label_reports_both_buckets() {
    let dashboard: AgencyDashboard = serde_json::from_value(serde_json::json!({
        "agency": {
            "id": "a1",
            "owner_id": "u1",
            "name": "Casas Levante",
            "description": null,
            "phone": null,
            "email": null,
            "created_on": null
        },
        "properties": [],
        "published_count": 4,
        "draft_count": 1
    }))
    .expect("dashboard");
    assert_eq!(counts_label(&dashboard), "4 published · 1 drafts");
}
