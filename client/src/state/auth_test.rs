use super::*;
use access::{AccessPermissions, RegistrationStatus, Role};

fn user(status: Option<RegistrationStatus>) -> User {
    User {
        id: "u1".to_owned(),
        email: "a@b.com".to_owned(),
        name: "a".to_owned(),
        registration_status: status,
        role: Role::Member,
    }
}

#[test]
fn default_is_resolved_and_anonymous() {
    let state = AuthState::default();
    assert!(state.is_anonymous());
    assert!(!state.snapshot().is_authenticated);
}

#[test]
fn loading_is_not_anonymous() {
    let state = AuthState::loading();
    assert!(!state.is_anonymous());
    assert!(state.snapshot().is_loading);
}

#[test]
fn resolved_user_is_authenticated() {
    let snapshot = AuthState::resolved(Some(user(Some(RegistrationStatus::Completed)))).snapshot();
    assert!(snapshot.is_authenticated);
    assert!(!snapshot.is_loading);
    assert!(AccessPermissions::derive(&snapshot).can_create_property);
}

#[test]
fn loading_snapshot_grants_nothing() {
    let state = AuthState { user: Some(user(Some(RegistrationStatus::Completed))), loading: true };
    assert_eq!(AccessPermissions::derive(&state.snapshot()), AccessPermissions::none());
}
