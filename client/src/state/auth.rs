//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use access::{AuthSnapshot, User};

/// Authentication state tracking the current user and loading status.
///
/// `App` starts in the loading state and resolves it once `/api/auth/me`
/// answers, so guards never mistake "not yet known" for "signed out".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn loading() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn resolved(user: Option<User>) -> Self {
        Self { user, loading: false }
    }

    /// Snapshot fed to the permission deriver.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            is_loading: self.loading,
            is_authenticated: !self.loading && self.user.is_some(),
            user: self.user.clone(),
        }
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        !self.loading && self.user.is_none()
    }
}
