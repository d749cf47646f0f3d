use super::*;
use access::{RegistrationStatus, Role, User};

fn user() -> User {
    User {
        id: "u1".to_owned(),
        email: "alice@example.com".to_owned(),
        name: "Alice".to_owned(),
        registration_status: Some(RegistrationStatus::PreRegistered),
        role: Role::Member,
    }
}

#[test]
fn redirects_when_user_exists() {
    assert!(should_redirect_signed_in(&AuthState::resolved(Some(user()))));
}

#[test]
fn stays_while_loading() {
    let state = AuthState { user: Some(user()), loading: true };
    assert!(!should_redirect_signed_in(&state));
}

#[test]
fn stays_when_signed_out() {
    assert!(!should_redirect_signed_in(&AuthState::resolved(None)));
}
