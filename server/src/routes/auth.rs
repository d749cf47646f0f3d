//! Auth routes: email access codes, session cookie, current user.

use access::AccessPermissions;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use super::error::ApiError;
use crate::services::{email_auth, session, user as user_svc};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";
const SESSION_MAX_AGE_DAYS: i64 = 30;

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::Unauthorized);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|e| ApiError::internal("session lookup failed", e))?
            .ok_or(ApiError::Unauthorized)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct RequestCodeBody {
    email: String,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct RequestCodeResponse {
    pub sent: bool,
    /// Present only when `EMAIL_CODE_ECHO` is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// `POST /api/auth/email/request-code`: issue an access code for an email.
pub async fn request_email_code(
    State(state): State<AppState>,
    Json(body): Json<RequestCodeBody>,
) -> Result<Json<RequestCodeResponse>, ApiError> {
    let email = email_auth::normalize_email(&body.email)
        .ok_or_else(|| ApiError::BadRequest(email_auth::EmailAuthError::InvalidEmail.to_string()))?;

    if let Err(e) = state.code_limiter.check_and_record(&email) {
        tracing::warn!(%email, error = %e, "access code request throttled");
        return Err(e.into());
    }

    if state.mailer.is_none() && !state.config.echo_codes {
        return Err(ApiError::Unavailable("email delivery is not configured".into()));
    }

    let code = email_auth::request_access_code(&state.pool, &email).await?;

    let sent = match &state.mailer {
        Some(mailer) => match mailer.send_access_code(&email, &code).await {
            Ok(()) => true,
            Err(e) if state.config.echo_codes => {
                tracing::error!(error = %e, %email, "access code delivery failed; echoing instead");
                false
            }
            Err(e) => return Err(ApiError::internal("access code delivery failed", e)),
        },
        None => false,
    };

    tracing::info!(%email, sent, "access code issued");
    let code = state.config.echo_codes.then_some(code);
    Ok(Json(RequestCodeResponse { sent, code }))
}

#[derive(Deserialize)]
pub struct VerifyCodeBody {
    email: String,
    code: String,
}

/// Current user plus the server's view of their capabilities.
#[derive(Serialize)]
pub struct MeResponse {
    pub user: access::User,
    pub permissions: AccessPermissions,
}

impl MeResponse {
    #[must_use]
    pub fn for_user(user: &session::SessionUser) -> Self {
        let user = user.to_access_user();
        let permissions = AccessPermissions::for_user(&user);
        Self { user, permissions }
    }
}

/// `POST /api/auth/email/verify-code`: verify code, create session, set cookie.
pub async fn verify_email_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyCodeBody>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = email_auth::verify_access_code(&state.pool, &body.email, &body.code).await?;

    let email = user_svc::email_for(&state.pool, user_id).await?;
    if state.config.is_admin_email(&email) {
        user_svc::promote_to_admin(&state.pool, user_id).await?;
    }

    let token = session::create_session(&state.pool, user_id).await?;
    let user = session::validate_session(&state.pool, &token)
        .await?
        .ok_or(ApiError::Internal)?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "user signed in");
    let jar = jar.add(session_cookie(token, state.config.cookie_secure));
    Ok((jar, Json(MeResponse::for_user(&user))))
}

/// `GET /api/auth/me`: return the current user and derived permissions.
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse::for_user(&auth.user))
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(e) = session::delete_session(&state.pool, &auth.token).await {
        tracing::error!(error = %e, "session delete failed");
    }

    let jar = CookieJar::new().add(cleared_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
