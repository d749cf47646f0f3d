//! Route-level capability guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages that need a capability wrap themselves in `ProtectedRoute`. The
//! component feeds decisions into a `RouteGuard` and performs the effects it
//! returns: a destructive notification, a cancellable 2000 ms redirect, and
//! finally client-side navigation.
//!
//! DESIGN
//! ======
//! The decision is memoized, so the driving effect re-runs only when the
//! permission input for this route actually changes. The pending redirect is
//! a `RedirectTask` kept in local storage; replacing or dropping it cancels
//! the timer, which is how teardown and regained access stop a redirect.

use access::Capability;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::feature_gate::RESTRICTED_TITLE;
use crate::state::auth::AuthState;
use crate::state::notify::{NotificationState, Severity};
use crate::util::guard::{GuardEffect, RouteGuard, decide};
use crate::util::permissions::use_access_permissions;
use crate::util::redirect::RedirectTask;

pub const DEFAULT_REDIRECT: &str = "/subscribe";
pub const DEFAULT_MESSAGE: &str = "You do not have access to this page. Redirecting...";
const FULL_FEATURES_MESSAGE: &str = "This page requires a completed registration. Redirecting...";

/// Handles the route needs to perform guard effects.
#[derive(Clone)]
struct GuardDriver<N> {
    guard: StoredValue<RouteGuard>,
    pending: StoredValue<Option<RedirectTask>, LocalStorage>,
    visible: RwSignal<bool>,
    notify: RwSignal<NotificationState>,
    message: StoredValue<String>,
    navigate: N,
}

impl<N> GuardDriver<N>
where
    N: Fn(&str, NavigateOptions) + Clone + 'static,
{
    fn apply(&self, effects: Vec<GuardEffect>) {
        for effect in effects {
            match effect {
                GuardEffect::Notify => {
                    let description = self.message.get_value();
                    self.notify.update(|n| {
                        n.push(RESTRICTED_TITLE, description, Severity::Destructive);
                    });
                }
                GuardEffect::Schedule { ticket, delay } => {
                    let driver = self.clone();
                    let task = RedirectTask::schedule(delay, move || {
                        let effects = driver
                            .guard
                            .try_update_value(|g| g.expire(ticket))
                            .unwrap_or_default();
                        driver.apply(effects);
                    });
                    self.pending.set_value(Some(task));
                }
                GuardEffect::Cancel { .. } => self.pending.set_value(None),
                GuardEffect::Navigate(target) => (self.navigate)(&target, NavigateOptions::default()),
            }
        }
        let visible = self.guard.try_with_value(RouteGuard::renders_children).unwrap_or(false);
        self.visible.set(visible);
    }
}

/// Render `children` only while `required_feature` is granted.
///
/// Without a required feature the children always render. On denial
/// nothing renders, one "Restricted" notification carrying `message` is
/// pushed, and the user is sent to `redirect_to` after the guard delay
/// unless access returns first or the route unmounts.
#[component]
pub fn ProtectedRoute(
    #[prop(optional)] required_feature: Option<Capability>,
    #[prop(into, default = DEFAULT_REDIRECT.to_owned())] redirect_to: String,
    #[prop(into, default = DEFAULT_MESSAGE.to_owned())] message: String,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notify = expect_context::<RwSignal<NotificationState>>();
    let permissions = use_access_permissions();

    let decision = Memo::new(move |_| {
        let loading = auth.with(|a| a.loading);
        permissions.with(|p| decide(required_feature, loading, p))
    });

    let guard = StoredValue::new(RouteGuard::new(redirect_to));
    let pending = StoredValue::new_local(None::<RedirectTask>);
    let visible = RwSignal::new(required_feature.is_none());
    let driver = GuardDriver {
        guard,
        pending,
        visible,
        notify,
        message: StoredValue::new(message),
        navigate: use_navigate(),
    };

    Effect::new(move || {
        let decision = decision.get();
        let effects = guard.try_update_value(|g| g.observe(decision)).unwrap_or_default();
        driver.apply(effects);
    });

    on_cleanup(move || {
        let _ = guard.try_update_value(RouteGuard::teardown);
        let _ = pending.try_update_value(Option::take);
    });

    view! { <Show when=move || visible.get()>{children()}</Show> }
}

/// [`ProtectedRoute`] locked to `canViewFullFeatures`.
#[component]
pub fn FullFeaturesRoute(
    #[prop(into, default = DEFAULT_REDIRECT.to_owned())] redirect_to: String,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <ProtectedRoute
            required_feature=Capability::CanViewFullFeatures
            redirect_to=redirect_to
            message=FULL_FEATURES_MESSAGE
        >
            {children()}
        </ProtectedRoute>
    }
}
