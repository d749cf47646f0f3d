use super::*;
use access::{Capability, RegistrationStatus, Role};
use uuid::Uuid;

fn session_user(status: Option<RegistrationStatus>, role: Role) -> session::SessionUser {
    session::SessionUser {
        id: Uuid::new_v4(),
        email: "test@inmogestion.com".into(),
        name: "test".into(),
        registration_status: status,
        role,
    }
}

// =============================================================================
// cookies
// =============================================================================

#[test]
fn session_cookie_is_http_only_and_scoped_to_root() {
    let cookie = session_cookie("abc".into(), true);
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "abc");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.max_age(), Some(Duration::days(SESSION_MAX_AGE_DAYS)));
}

#[test]
fn cleared_cookie_expires_immediately() {
    let cookie = cleared_cookie(false);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    assert_eq!(cookie.secure(), Some(false));
}

// =============================================================================
// /api/auth/me payload
// =============================================================================

#[test]
fn me_response_derives_permissions_from_user() {
    let me = MeResponse::for_user(&session_user(Some(RegistrationStatus::PreRegistered), Role::Member));
    assert!(me.permissions.allows(Capability::CanViewProperties));
    assert!(!me.permissions.allows(Capability::CanCreateProperty));
    assert_eq!(me.user.email, "test@inmogestion.com");
}

#[test]
fn me_response_serializes_camel_case_flags() {
    let me = MeResponse::for_user(&session_user(Some(RegistrationStatus::Completed), Role::Admin));
    let json = serde_json::to_value(&me).expect("serialize");
    assert_eq!(json["permissions"]["canAccessAdminDashboard"], true);
    assert_eq!(json["user"]["role"], "admin");
    assert_eq!(json["user"]["registration_status"], "completed");
}

#[test]
fn request_code_response_omits_code_unless_echoed() {
    let hidden = serde_json::to_value(RequestCodeResponse { sent: true, code: None }).expect("serialize");
    assert!(hidden.get("code").is_none());

    let echoed = serde_json::to_value(RequestCodeResponse { sent: false, code: Some("ABC234".into()) }).expect("serialize");
    assert_eq!(echoed["code"], "ABC234");
}
