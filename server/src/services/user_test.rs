use super::*;

#[test]
fn empty_update_detected() {
    assert!(UserUpdate::default().is_empty());
    assert!(!UserUpdate { role: Some(Role::Admin), ..UserUpdate::default() }.is_empty());
    assert!(
        !UserUpdate { registration_status: Some(RegistrationStatus::Completed), ..UserUpdate::default() }.is_empty()
    );
}

#[test]
fn admin_user_row_flattens_user_fields() {
    let row = AdminUserRow {
        user: SessionUser {
            id: Uuid::nil(),
            email: "ana@example.com".into(),
            name: "ana".into(),
            registration_status: Some(RegistrationStatus::Completed),
            role: Role::Member,
        },
        member_since: Some("2026-01-02".into()),
    };
    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["email"], "ana@example.com");
    assert_eq!(json["registration_status"], "completed");
    assert_eq!(json["member_since"], "2026-01-02");
}

#[tokio::test]
async fn update_user_rejects_empty_update_before_querying() {
    let state = crate::state::test_helpers::test_app_state();
    let result = update_user(&state.pool, Uuid::nil(), UserUpdate::default()).await;
    assert!(matches!(result, Err(UserError::EmptyUpdate)));
}
