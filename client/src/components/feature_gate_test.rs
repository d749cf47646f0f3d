use super::*;
use access::{RegistrationStatus, Role, User};

fn perms(status: RegistrationStatus) -> AccessPermissions {
    AccessPermissions::for_user(&User {
        id: "u1".into(),
        email: "a@b.com".into(),
        name: String::new(),
        registration_status: Some(status),
        role: Role::Member,
    })
}

#[test]
fn denied_activation_is_restricted() {
    let p = perms(RegistrationStatus::PreRegistered);
    assert_eq!(activation(&p, Capability::CanCreateProperty), Activation::Restricted);
    assert_eq!(activation(&p, Capability::CanViewProperties), Activation::Run);
}

#[test]
fn completed_member_runs_create_but_not_admin() {
    let p = perms(RegistrationStatus::Completed);
    assert_eq!(activation(&p, Capability::CanCreateProperty), Activation::Run);
    assert_eq!(activation(&p, Capability::CanAccessAdminDashboard), Activation::Restricted);
}

#[test]
fn signed_out_restricts_everything() {
    let p = AccessPermissions::none();
    for cap in Capability::ALL {
        assert_eq!(activation(&p, cap), Activation::Restricted, "{cap}");
    }
}

#[test]
fn every_capability_has_a_label() {
    for cap in Capability::ALL {
        assert!(!feature_label(cap).is_empty(), "{cap}");
    }
}

#[test]
fn restricted_description_names_the_feature() {
    assert_eq!(
        restricted_description(Capability::CanDeleteProperty),
        "Your account does not include deleting listings."
    );
}
