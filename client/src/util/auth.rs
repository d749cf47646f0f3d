//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login route sends users who are already signed in back to the listing
//! page instead of asking for another code.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Whether a finished session check found a signed-in user.
#[must_use]
pub fn should_redirect_signed_in(state: &AuthState) -> bool {
    !state.loading && state.user.is_some()
}

/// Redirect to `/` whenever auth has loaded and a user is present.
pub fn install_signed_in_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.with(should_redirect_signed_in) {
            navigate("/", NavigateOptions::default());
        }
    });
}
