use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = NotificationState::default();
    let a = state.push("A", "first", Severity::Normal);
    let b = state.push("B", "second", Severity::Destructive);
    assert!(b > a);
    assert_eq!(state.ids(), vec![a, b]);
    assert_eq!(state.items[1].severity, Severity::Destructive);
}

#[test]
fn dismiss_removes_only_matching_id() {
    let mut state = NotificationState::default();
    let a = state.push("A", "", Severity::Normal);
    let b = state.push("B", "", Severity::Normal);
    state.dismiss(a);
    assert_eq!(state.ids(), vec![b]);
    state.dismiss(999);
    assert_eq!(state.ids(), vec![b]);
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut state = NotificationState::default();
    let a = state.push("A", "", Severity::Normal);
    state.dismiss(a);
    let b = state.push("B", "", Severity::Normal);
    assert_ne!(a, b);
}

#[test]
fn destructive_severity_has_modifier_class() {
    assert_eq!(Severity::Normal.css_class(), "toast");
    assert!(Severity::Destructive.css_class().contains("toast--destructive"));
}
