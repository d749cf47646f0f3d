//! Capability-gated rendering and actions.
//!
//! DESIGN
//! ======
//! Both components read the memoized permission set and never touch the
//! network. `FeatureGate` swaps its children for a blocking panel while
//! `ConditionalAction` keeps its control visible but intercepts activation.
//! The API re-checks every capability, so these gates only shape what the
//! user is offered.

#[cfg(test)]
#[path = "feature_gate_test.rs"]
mod feature_gate_test;

use access::{AccessPermissions, Capability};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::notify::{NotificationState, Severity};
use crate::util::permissions::use_access_permissions;

/// Route the upgrade control sends users to.
pub const UPGRADE_PATH: &str = "/subscribe";

pub const DEFAULT_FALLBACK_MESSAGE: &str = "Complete your registration to unlock this feature.";

pub const RESTRICTED_TITLE: &str = "Restricted";
const UPGRADE_TITLE: &str = "Upgrade required";
const UPGRADE_DESCRIPTION: &str = "Finish registering your account to use every feature.";

/// What activating a gated control does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Run,
    Restricted,
}

#[must_use]
pub fn activation(permissions: &AccessPermissions, feature: Capability) -> Activation {
    if permissions.allows(feature) { Activation::Run } else { Activation::Restricted }
}

/// Human-readable name of a capability for notifications.
#[must_use]
pub fn feature_label(feature: Capability) -> &'static str {
    match feature {
        Capability::CanViewProperties => "property listings",
        Capability::CanViewAgencies => "the agency directory",
        Capability::CanViewLocations => "locations",
        Capability::CanViewCategories => "categories",
        Capability::CanViewBanners => "featured banners",
        Capability::CanSearchProperties => "property search",
        Capability::CanViewDetailedProperty => "listing details",
        Capability::CanAccessAgencyDashboard => "the agency dashboard",
        Capability::CanCreateAgency => "creating an agency",
        Capability::CanCreateProperty => "publishing listings",
        Capability::CanUpdateProperty => "editing listings",
        Capability::CanDeleteProperty => "deleting listings",
        Capability::CanAccessAdminDashboard => "the admin dashboard",
        Capability::CanViewFullFeatures => "the full feature set",
    }
}

#[must_use]
pub fn restricted_description(feature: Capability) -> String {
    format!("Your account does not include {}.", feature_label(feature))
}

/// Push the destructive "Restricted" notification for `feature`.
pub fn notify_restricted(notify: RwSignal<NotificationState>, feature: Capability) {
    notify.update(|n| {
        n.push(RESTRICTED_TITLE, restricted_description(feature), Severity::Destructive);
    });
}

/// Render `children` only when `feature` is granted.
///
/// Otherwise a blocking panel shows `fallback_message` and, unless
/// `show_upgrade` is false, an upgrade button leading to [`UPGRADE_PATH`].
#[component]
pub fn FeatureGate(
    feature: Capability,
    #[prop(into, default = DEFAULT_FALLBACK_MESSAGE.to_owned())] fallback_message: String,
    #[prop(default = true)] show_upgrade: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let permissions = use_access_permissions();
    let notify = expect_context::<RwSignal<NotificationState>>();
    let navigate = use_navigate();

    // The button only records intent; the effect owns navigation.
    let upgrade_requested = RwSignal::new(false);
    Effect::new(move || {
        if upgrade_requested.get() {
            upgrade_requested.set(false);
            navigate(UPGRADE_PATH, NavigateOptions::default());
        }
    });

    let fallback = move || {
        let message = fallback_message.clone();
        view! {
            <div class="feature-gate" role="alert">
                <p class="feature-gate__message">{message}</p>
                <Show when=move || show_upgrade>
                    <button
                        class="btn btn--primary feature-gate__upgrade"
                        on:click=move |_| {
                            notify.update(|n| {
                                n.push(UPGRADE_TITLE, UPGRADE_DESCRIPTION, Severity::Normal);
                            });
                            upgrade_requested.set(true);
                        }
                    >
                        "Upgrade"
                    </button>
                </Show>
            </div>
        }
    };

    view! {
        <Show when=move || permissions.with(|p| p.allows(feature)) fallback=fallback>
            {children()}
        </Show>
    }
}

/// A button whose action runs only when `feature` is granted.
///
/// Denied activations push a "Restricted" notification and `on_activate` is
/// never called. The control stays clickable either way.
#[component]
pub fn ConditionalAction(
    feature: Capability,
    on_activate: Callback<()>,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let permissions = use_access_permissions();
    let notify = expect_context::<RwSignal<NotificationState>>();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        match permissions.with_untracked(|p| activation(p, feature)) {
            Activation::Run => on_activate.run(()),
            Activation::Restricted => notify_restricted(notify, feature),
        }
    };

    view! {
        <button
            type="button"
            class=format!("btn conditional-action {class}")
            class:conditional-action--locked=move || !permissions.with(|p| p.allows(feature))
            on:click=on_click
        >
            {children()}
        </button>
    }
}
