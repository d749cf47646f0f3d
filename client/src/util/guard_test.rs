use super::*;
use access::{RegistrationStatus, Role, User};

fn permissions(status: RegistrationStatus) -> AccessPermissions {
    AccessPermissions::for_user(&User {
        id: "u1".into(),
        email: "a@b.com".into(),
        name: "a".into(),
        registration_status: Some(status),
        role: Role::Member,
    })
}

fn scheduled_ticket(effects: &[GuardEffect]) -> Ticket {
    effects
        .iter()
        .find_map(|e| match e {
            GuardEffect::Schedule { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("schedule effect")
}

// =============================================================================
// decide
// =============================================================================

#[test]
fn no_requirement_always_allows() {
    assert_eq!(decide(None, true, &AccessPermissions::none()), Decision::Allow);
    assert_eq!(decide(None, false, &AccessPermissions::none()), Decision::Allow);
}

#[test]
fn loading_is_pending() {
    let perms = permissions(RegistrationStatus::Completed);
    assert_eq!(decide(Some(Capability::CanCreateProperty), true, &perms), Decision::Pending);
}

#[test]
fn present_capability_allows_absent_denies() {
    let perms = permissions(RegistrationStatus::PreRegistered);
    assert_eq!(decide(Some(Capability::CanViewProperties), false, &perms), Decision::Allow);
    assert_eq!(decide(Some(Capability::CanCreateProperty), false, &perms), Decision::Deny);
}

// =============================================================================
// RouteGuard
// =============================================================================

#[test]
fn starts_evaluating_and_renders_nothing() {
    let guard = RouteGuard::new("/subscribe");
    assert_eq!(guard.state(), &GuardState::Evaluating);
    assert!(!guard.renders_children());
}

#[test]
fn pending_stays_evaluating_without_effects() {
    let mut guard = RouteGuard::new("/subscribe");
    assert!(guard.observe(Decision::Pending).is_empty());
    assert_eq!(guard.state(), &GuardState::Evaluating);
}

#[test]
fn allow_renders_children_without_effects() {
    let mut guard = RouteGuard::new("/subscribe");
    assert!(guard.observe(Decision::Allow).is_empty());
    assert!(guard.renders_children());
}

#[test]
fn deny_notifies_once_and_schedules_redirect() {
    let mut guard = RouteGuard::new("/subscribe");
    let effects = guard.observe(Decision::Deny);
    assert_eq!(effects.iter().filter(|e| **e == GuardEffect::Notify).count(), 1);
    let ticket = scheduled_ticket(&effects);
    assert!(effects.contains(&GuardEffect::Schedule { ticket, delay: REDIRECT_DELAY }));
    assert!(!guard.renders_children());
}

#[test]
fn repeated_deny_is_idempotent() {
    let mut guard = RouteGuard::new("/subscribe");
    guard.observe(Decision::Deny);
    for _ in 0..5 {
        assert!(guard.observe(Decision::Deny).is_empty());
    }
}

#[test]
fn expiry_navigates_to_target() {
    let mut guard = RouteGuard::new("/subscribe");
    let ticket = scheduled_ticket(&guard.observe(Decision::Deny));
    assert_eq!(guard.expire(ticket), vec![GuardEffect::Navigate("/subscribe".into())]);
    assert_eq!(guard.state(), &GuardState::Redirected);
}

#[test]
fn redirected_is_terminal() {
    let mut guard = RouteGuard::new("/login");
    let ticket = scheduled_ticket(&guard.observe(Decision::Deny));
    guard.expire(ticket);
    assert!(guard.observe(Decision::Allow).is_empty());
    assert!(guard.expire(ticket).is_empty());
    assert_eq!(guard.state(), &GuardState::Redirected);
}

#[test]
fn regaining_permission_cancels_redirect() {
    let mut guard = RouteGuard::new("/subscribe");
    let ticket = scheduled_ticket(&guard.observe(Decision::Deny));
    assert_eq!(guard.observe(Decision::Allow), vec![GuardEffect::Cancel { ticket }]);
    assert!(guard.renders_children());
    assert!(guard.expire(ticket).is_empty());
}

#[test]
fn loading_again_cancels_redirect() {
    let mut guard = RouteGuard::new("/subscribe");
    let ticket = scheduled_ticket(&guard.observe(Decision::Deny));
    assert_eq!(guard.observe(Decision::Pending), vec![GuardEffect::Cancel { ticket }]);
    assert_eq!(guard.state(), &GuardState::Evaluating);
}

#[test]
fn stale_ticket_is_ignored_after_rearm() {
    let mut guard = RouteGuard::new("/subscribe");
    let first = scheduled_ticket(&guard.observe(Decision::Deny));
    guard.observe(Decision::Allow);
    let second = scheduled_ticket(&guard.observe(Decision::Deny));
    assert_ne!(first, second);
    assert!(guard.expire(first).is_empty());
    assert_eq!(guard.expire(second), vec![GuardEffect::Navigate("/subscribe".into())]);
}

#[test]
fn permission_change_rearms_notification() {
    let mut guard = RouteGuard::new("/subscribe");
    guard.observe(Decision::Deny);
    guard.observe(Decision::Allow);
    let effects = guard.observe(Decision::Deny);
    assert!(effects.contains(&GuardEffect::Notify));
}

#[test]
fn teardown_cancels_pending_redirect() {
    let mut guard = RouteGuard::new("/subscribe");
    let ticket = scheduled_ticket(&guard.observe(Decision::Deny));
    assert_eq!(guard.teardown(), vec![GuardEffect::Cancel { ticket }]);
    assert!(guard.expire(ticket).is_empty());
}

#[test]
fn teardown_without_pending_is_quiet() {
    let mut guard = RouteGuard::new("/subscribe");
    guard.observe(Decision::Allow);
    assert!(guard.teardown().is_empty());
}

#[test]
fn redirect_delay_is_two_seconds() {
    assert_eq!(REDIRECT_DELAY, Duration::from_millis(2000));
}
