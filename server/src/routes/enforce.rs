//! Capability enforcement for API handlers.
//!
//! DESIGN
//! ======
//! The browser hides gated surfaces, but that is presentation only. Every
//! gated handler takes `Access` and calls `require` before touching data,
//! deriving permissions from the user row loaded for this request.

use access::{AccessPermissions, Capability};
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::services::property::Viewer;
use crate::services::session::SessionUser;
use crate::state::AppState;

/// Authenticated caller plus derived permissions.
pub struct Access {
    pub user: SessionUser,
    pub permissions: AccessPermissions,
}

impl Access {
    #[must_use]
    pub fn new(user: SessionUser) -> Self {
        let permissions = AccessPermissions::for_user(&user.to_access_user());
        Self { user, permissions }
    }

    /// Fail with 403 unless `capability` is granted.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` naming the missing capability.
    pub fn require(&self, capability: Capability) -> Result<(), ApiError> {
        if self.permissions.allows(capability) {
            return Ok(());
        }
        tracing::warn!(
            user_id = %self.user.id,
            status = ?self.permissions.registration_status,
            capability = capability.as_str(),
            "capability denied"
        );
        Err(ApiError::Forbidden(capability))
    }

    #[must_use]
    pub fn viewer(&self) -> Viewer {
        Viewer { user_id: self.user.id, is_admin: self.user.is_admin() }
    }
}

impl<S> FromRequestParts<S> for Access
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        Ok(Self::new(auth.user))
    }
}

#[cfg(test)]
#[path = "enforce_test.rs"]
mod tests;
