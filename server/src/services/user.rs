//! User records: role bootstrap and administrative updates.
//!
//! The role claim is the only source of admin capability. Configured
//! bootstrap addresses are promoted when they sign in, so a fresh deployment
//! has an administrator without anyone editing rows by hand.

use access::{RegistrationStatus, Role};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::session::SessionUser;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user not found: {0}")]
    NotFound(Uuid),
    #[error("nothing to update")]
    EmptyUpdate,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// User row as listed in the admin dashboard.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AdminUserRow {
    #[serde(flatten)]
    pub user: SessionUser,
    pub member_since: Option<String>,
}

/// Registration funnel counts for the admin overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct UserCounts {
    pub total: i64,
    pub pre_registered: i64,
    pub completed: i64,
    pub admins: i64,
}

/// Requested changes to a user's claims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub registration_status: Option<RegistrationStatus>,
    pub role: Option<Role>,
}

impl UserUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registration_status.is_none() && self.role.is_none()
    }
}

/// Promote `user_id` to admin. Idempotent.
///
/// # Errors
///
/// Returns a database error if the update fails.
pub async fn promote_to_admin(pool: &PgPool, user_id: Uuid) -> Result<(), UserError> {
    sqlx::query("UPDATE users SET role = 'admin' WHERE id = $1 AND role <> 'admin'")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Fetch one user's email.
///
/// # Errors
///
/// Returns `NotFound` if the row is missing.
pub async fn email_for(pool: &PgPool, user_id: Uuid) -> Result<String, UserError> {
    let row = sqlx::query("SELECT email FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(UserError::NotFound(user_id))?;
    Ok(row.get("email"))
}

/// List users, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_users(pool: &PgPool, limit: i64) -> Result<Vec<AdminUserRow>, UserError> {
    let rows = sqlx::query(
        r"SELECT id, email, name, registration_status, role,
                 to_char(created_at, 'YYYY-MM-DD') AS member_since
          FROM users
          ORDER BY created_at DESC
          LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| AdminUserRow { user: SessionUser::from_row(row), member_since: row.get("member_since") })
        .collect())
}

/// Apply an admin update and return the resulting user.
///
/// # Errors
///
/// Returns `EmptyUpdate` if no field was provided and `NotFound` if the
/// user does not exist.
pub async fn update_user(pool: &PgPool, user_id: Uuid, update: UserUpdate) -> Result<SessionUser, UserError> {
    if update.is_empty() {
        return Err(UserError::EmptyUpdate);
    }

    let row = sqlx::query(
        r"UPDATE users
          SET registration_status = COALESCE($2, registration_status),
              role = COALESCE($3, role)
          WHERE id = $1
          RETURNING id, email, name, registration_status, role",
    )
    .bind(user_id)
    .bind(update.registration_status.map(RegistrationStatus::as_str))
    .bind(update.role.map(Role::as_str))
    .fetch_optional(pool)
    .await?
    .ok_or(UserError::NotFound(user_id))?;

    Ok(SessionUser::from_row(&row))
}

/// Count users by registration status and role.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn count_users(pool: &PgPool) -> Result<UserCounts, UserError> {
    let row = sqlx::query(
        r"SELECT
              COUNT(*) AS total,
              COUNT(*) FILTER (WHERE registration_status IS DISTINCT FROM 'completed') AS pre_registered,
              COUNT(*) FILTER (WHERE registration_status = 'completed') AS completed,
              COUNT(*) FILTER (WHERE role = 'admin') AS admins
          FROM users",
    )
    .fetch_one(pool)
    .await?;

    Ok(UserCounts {
        total: row.get("total"),
        pre_registered: row.get("pre_registered"),
        completed: row.get("completed"),
        admins: row.get("admins"),
    })
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
