//! Agency routes.

use access::Capability;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use super::enforce::Access;
use super::error::ApiError;
use crate::services::agency::{self, AgencyDashboard, AgencyRow, NewAgency};
use crate::state::AppState;

/// `GET /api/agencies`
pub async fn list_agencies(State(state): State<AppState>, access: Access) -> Result<Json<Vec<AgencyRow>>, ApiError> {
    access.require(Capability::CanViewAgencies)?;
    Ok(Json(agency::list_agencies(&state.pool).await?))
}

/// `POST /api/agencies`
pub async fn create_agency(
    State(state): State<AppState>,
    access: Access,
    Json(body): Json<NewAgency>,
) -> Result<impl IntoResponse, ApiError> {
    access.require(Capability::CanCreateAgency)?;
    let row = agency::create_agency(&state.pool, access.user.id, &body).await?;
    tracing::info!(agency_id = %row.id, owner_id = %row.owner_id, "agency created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /api/agencies/dashboard`
pub async fn dashboard(State(state): State<AppState>, access: Access) -> Result<Json<AgencyDashboard>, ApiError> {
    access.require(Capability::CanAccessAgencyDashboard)?;
    Ok(Json(agency::dashboard(&state.pool, access.user.id).await?))
}
