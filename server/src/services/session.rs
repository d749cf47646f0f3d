//! Session management.
//!
//! ARCHITECTURE
//! ============
//! HTTP auth uses long-lived opaque session tokens stored in an `HttpOnly`
//! cookie. Validating a token joins the user row so every request sees the
//! current registration status and role, never a cached copy.

use std::fmt::Write;

use access::{RegistrationStatus, Role, User};
use rand::Rng;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// User row returned from session validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: Uuid,
    pub email: String,
    /// Display name.
    pub name: String,
    /// `None` for rows created before registration tracking.
    pub registration_status: Option<RegistrationStatus>,
    pub role: Role,
}

impl SessionUser {
    /// Identity view consumed by the permission deriver.
    #[must_use]
    pub fn to_access_user(&self) -> User {
        User {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
            registration_status: self.registration_status,
            role: self.role,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Map a `users` row selected with `id, email, name, registration_status, role`.
    pub(crate) fn from_row(row: &PgRow) -> Self {
        let status: Option<String> = row.get("registration_status");
        let role: String = row.get("role");
        Self {
            id: row.get("id"),
            email: row.get("email"),
            name: row.get("name"),
            registration_status: status.as_deref().and_then(RegistrationStatus::parse),
            role: Role::parse(&role).unwrap_or_default(),
        }
    }
}

/// Create a session for the given user, returning the token.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.email, u.name, u.registration_status, u.role
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(SessionUser::from_row))
}

/// Delete a session by token.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove expired sessions. Returns the number of rows deleted.
pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
