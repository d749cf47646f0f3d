//! Upgrade landing page, the default redirect target for denied routes.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::util::permissions::use_access_permissions;

#[component]
pub fn SubscribePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let permissions = use_access_permissions();

    let status = move || {
        if auth.with(|a| a.loading) {
            return "Checking your account...";
        }
        if auth.with(AuthState::is_anonymous) {
            return "You are not signed in.";
        }
        if permissions.with(|p| p.can_view_full_features) {
            "Your account already has every feature."
        } else {
            "Your account is pre-registered: you can browse, but publishing and dashboards need a completed registration."
        }
    };

    view! {
        <div class="subscribe-page">
            <h1>"Unlock InmoGestion"</h1>
            <p class="subscribe-page__status">{status}</p>
            <ul class="subscribe-page__features">
                <li>"Publish and manage listings"</li>
                <li>"Your own agency dashboard"</li>
                <li>"Rent index for every city"</li>
            </ul>
            <Show
                when=move || auth.with(AuthState::is_anonymous)
                fallback=|| view! { <p>"Contact our team to complete your registration."</p> }
            >
                <a class="btn btn--primary" href="/login">
                    "Sign in"
                </a>
            </Show>
        </div>
    }
}
