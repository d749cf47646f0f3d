//! HTTP error mapping.
//!
//! DESIGN
//! ======
//! Every service error funnels into `ApiError`, which renders as a status
//! code plus `{ "error": "..." }`. Internal failures are logged where they
//! are converted and reach the client only as a generic message.

use access::Capability;
use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::rate_limit::RateLimitError;
use crate::services::agency::AgencyError;
use crate::services::email_auth::EmailAuthError;
use crate::services::property::PropertyError;
use crate::services::user::UserError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("authentication required")]
    Unauthorized,
    #[error("missing capability {0}")]
    Forbidden(Capability),
    #[error("{0}")]
    NotPermitted(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{message}")]
    TooManyRequests { message: String, retry_after_secs: u64 },
    #[error("{0}")]
    Unavailable(String),
    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    /// Log `err` and collapse it into an opaque 500.
    pub fn internal(context: &'static str, err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) | Self::NotPermitted(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let mut res = (self.status(), Json(ErrorBody { error: &message })).into_response();
        if let Self::TooManyRequests { retry_after_secs, .. } = self {
            res.headers_mut()
                .insert(header::RETRY_AFTER, retry_after_secs.into());
        }
        res
    }
}

// =============================================================================
// SERVICE ERROR CONVERSIONS
// =============================================================================

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::internal("database query failed", err)
    }
}

impl From<PropertyError> for ApiError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::NotFound(_) => Self::NotFound("property not found".into()),
            PropertyError::NotOwner(_) => Self::NotPermitted("only the owner or an administrator may change this property".into()),
            PropertyError::NoAgency => Self::Conflict(err.to_string()),
            PropertyError::Invalid(msg) => Self::BadRequest(msg),
            PropertyError::Database(db) => Self::internal("property query failed", db),
        }
    }
}

impl From<AgencyError> for ApiError {
    fn from(err: AgencyError) -> Self {
        match err {
            AgencyError::AlreadyExists(_) => Self::Conflict("you already own an agency".into()),
            AgencyError::NotFound(_) => Self::NotFound("no agency registered for this account".into()),
            AgencyError::Invalid(msg) => Self::BadRequest(msg),
            AgencyError::Database(db) => Self::internal("agency query failed", db),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Self::NotFound("user not found".into()),
            UserError::EmptyUpdate => Self::BadRequest(err.to_string()),
            UserError::Database(db) => Self::internal("user query failed", db),
        }
    }
}

impl From<EmailAuthError> for ApiError {
    fn from(err: EmailAuthError) -> Self {
        match err {
            EmailAuthError::InvalidEmail | EmailAuthError::InvalidCode => Self::BadRequest(err.to_string()),
            EmailAuthError::VerificationFailed => Self::Unauthorized,
            EmailAuthError::Db(db) => Self::internal("email auth query failed", db),
        }
    }
}

impl From<RateLimitError> for ApiError {
    fn from(err: RateLimitError) -> Self {
        let window_secs = match err {
            RateLimitError::PerEmailExceeded { window_secs, .. } | RateLimitError::GlobalExceeded { window_secs, .. } => {
                window_secs
            }
        };
        Self::TooManyRequests { message: err.to_string(), retry_after_secs: window_secs }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
