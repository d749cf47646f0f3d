use super::*;

#[test]
fn limit_defaults_and_clamps() {
    assert_eq!(clamp_limit(None), DEFAULT_USER_LIMIT);
    assert_eq!(clamp_limit(Some(0)), 1);
    assert_eq!(clamp_limit(Some(10_000)), MAX_USER_LIMIT);
    assert_eq!(clamp_limit(Some(25)), 25);
}

#[test]
fn admin_cannot_demote_self() {
    let id = Uuid::new_v4();
    let update = UserUpdate { registration_status: None, role: Some(Role::Member) };
    assert!(matches!(check_self_demotion(id, id, update), Err(ApiError::Conflict(_))));
}

#[test]
fn admin_may_demote_others_and_edit_self_status() {
    let me = Uuid::new_v4();
    let demote = UserUpdate { registration_status: None, role: Some(Role::Member) };
    assert!(check_self_demotion(me, Uuid::new_v4(), demote).is_ok());

    let status_only = UserUpdate { registration_status: Some(RegistrationStatus::Completed), role: None };
    assert!(check_self_demotion(me, me, status_only).is_ok());
}

#[test]
fn patch_body_parses_claim_names() {
    let body: UserPatchBody = serde_json::from_value(serde_json::json!({
        "registration_status": "completed",
        "role": "admin"
    }))
    .expect("body");
    assert_eq!(body.registration_status, Some(RegistrationStatus::Completed));
    assert_eq!(body.role, Some(Role::Admin));
}
