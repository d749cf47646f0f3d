//! Administrator routes.
//!
//! Gated on `canAccessAdminDashboard`, which follows the `admin` role claim.
//! An administrator may not strip their own role, so a deployment always
//! keeps at least the caller as admin.

use access::{Capability, RegistrationStatus, Role};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enforce::Access;
use super::error::ApiError;
use crate::services::session::SessionUser;
use crate::services::user::{self as user_svc, AdminUserRow, UserCounts, UserUpdate};
use crate::services::{agency, catalog};
use crate::state::AppState;

const DEFAULT_USER_LIMIT: i64 = 100;
const MAX_USER_LIMIT: i64 = 500;

#[derive(Serialize)]
pub struct Overview {
    pub users: UserCounts,
    pub agencies: i64,
    pub properties: i64,
    pub published_properties: i64,
}

/// `GET /api/admin/overview`
pub async fn overview(State(state): State<AppState>, access: Access) -> Result<Json<Overview>, ApiError> {
    access.require(Capability::CanAccessAdminDashboard)?;
    let users = user_svc::count_users(&state.pool).await?;
    let agencies = agency::count_agencies(&state.pool).await?;
    let (properties, published_properties) = catalog::count_properties(&state.pool).await?;
    Ok(Json(Overview { users, agencies, properties, published_properties }))
}

#[derive(Deserialize)]
pub struct UserListQuery {
    limit: Option<i64>,
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_USER_LIMIT).clamp(1, MAX_USER_LIMIT)
}

/// `GET /api/admin/users`
pub async fn list_users(
    State(state): State<AppState>,
    access: Access,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<AdminUserRow>>, ApiError> {
    access.require(Capability::CanAccessAdminDashboard)?;
    Ok(Json(user_svc::list_users(&state.pool, clamp_limit(query.limit)).await?))
}

#[derive(Deserialize, Default)]
pub struct UserPatchBody {
    registration_status: Option<RegistrationStatus>,
    role: Option<Role>,
}

fn check_self_demotion(caller: Uuid, target: Uuid, update: UserUpdate) -> Result<(), ApiError> {
    if caller == target && update.role == Some(Role::Member) {
        return Err(ApiError::Conflict("administrators cannot remove their own admin role".into()));
    }
    Ok(())
}

/// `PATCH /api/admin/users/{id}`
pub async fn update_user(
    State(state): State<AppState>,
    access: Access,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UserPatchBody>,
) -> Result<Json<SessionUser>, ApiError> {
    access.require(Capability::CanAccessAdminDashboard)?;
    let update = UserUpdate { registration_status: body.registration_status, role: body.role };
    check_self_demotion(access.user.id, user_id, update)?;

    let user = user_svc::update_user(&state.pool, user_id, update).await?;
    tracing::info!(
        admin_id = %access.user.id,
        %user_id,
        status = ?user.registration_status,
        role = user.role.as_str(),
        "user claims updated"
    );
    Ok(Json(user))
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
