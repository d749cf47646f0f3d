use super::*;
use access::{RegistrationStatus, Role};
use axum::http::StatusCode;
use uuid::Uuid;

fn session_user(status: Option<RegistrationStatus>, role: Role) -> SessionUser {
    SessionUser {
        id: Uuid::new_v4(),
        email: "ana@example.com".into(),
        name: "ana".into(),
        registration_status: status,
        role,
    }
}

#[test]
fn pre_registered_cannot_create_property() {
    let access = Access::new(session_user(Some(RegistrationStatus::PreRegistered), Role::Member));
    let err = access.require(Capability::CanCreateProperty).expect_err("denied");
    assert!(matches!(err, ApiError::Forbidden(Capability::CanCreateProperty)));
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}

#[test]
fn pre_registered_can_browse() {
    let access = Access::new(session_user(Some(RegistrationStatus::PreRegistered), Role::Member));
    for cap in Capability::BROWSING {
        assert!(access.require(cap).is_ok(), "{cap}");
    }
}

#[test]
fn missing_status_is_browse_only() {
    let access = Access::new(session_user(None, Role::Admin));
    assert!(access.require(Capability::CanViewProperties).is_ok());
    assert!(access.require(Capability::CanAccessAdminDashboard).is_err());
}

#[test]
fn completed_member_cannot_open_admin() {
    let access = Access::new(session_user(Some(RegistrationStatus::Completed), Role::Member));
    assert!(access.require(Capability::CanCreateProperty).is_ok());
    assert!(access.require(Capability::CanAccessAdminDashboard).is_err());
}

#[test]
fn completed_admin_passes_every_check() {
    let access = Access::new(session_user(Some(RegistrationStatus::Completed), Role::Admin));
    for cap in Capability::ALL {
        assert!(access.require(cap).is_ok(), "{cap}");
    }
    assert!(access.viewer().is_admin);
}

#[test]
fn viewer_carries_user_id() {
    let user = session_user(Some(RegistrationStatus::Completed), Role::Member);
    let id = user.id;
    let viewer = Access::new(user).viewer();
    assert_eq!(viewer.user_id, id);
    assert!(!viewer.is_admin);
}
