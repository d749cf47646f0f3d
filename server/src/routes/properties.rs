//! Property listing routes.

use access::Capability;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use uuid::Uuid;

use super::enforce::Access;
use super::error::ApiError;
use crate::services::property::{self, NewProperty, PropertyFilter, PropertyPage, PropertyPatch, PropertyRow};
use crate::state::AppState;

/// Capabilities a listing query needs. Search criteria add `canSearchProperties`.
#[must_use]
pub fn required_for_listing(filter: &PropertyFilter) -> Vec<Capability> {
    let mut required = vec![Capability::CanViewProperties];
    if filter.has_search_terms() {
        required.push(Capability::CanSearchProperties);
    }
    required
}

/// `GET /api/properties`
pub async fn list_properties(
    State(state): State<AppState>,
    access: Access,
    Query(filter): Query<PropertyFilter>,
) -> Result<Json<PropertyPage>, ApiError> {
    for capability in required_for_listing(&filter) {
        access.require(capability)?;
    }
    let page = property::search_properties(&state.pool, &filter, access.viewer()).await?;
    Ok(Json(page))
}

/// `GET /api/properties/{id}`
pub async fn get_property(
    State(state): State<AppState>,
    access: Access,
    Path(property_id): Path<Uuid>,
) -> Result<Json<PropertyRow>, ApiError> {
    access.require(Capability::CanViewDetailedProperty)?;
    let row = property::get_property(&state.pool, property_id, access.viewer()).await?;
    Ok(Json(row))
}

/// `POST /api/properties`
pub async fn create_property(
    State(state): State<AppState>,
    access: Access,
    Json(body): Json<NewProperty>,
) -> Result<impl IntoResponse, ApiError> {
    access.require(Capability::CanCreateProperty)?;
    let row = property::create_property(&state.pool, access.user.id, &body).await?;
    tracing::info!(property_id = %row.id, owner_id = %row.owner_id, "property created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// `PATCH /api/properties/{id}`
pub async fn update_property(
    State(state): State<AppState>,
    access: Access,
    Path(property_id): Path<Uuid>,
    Json(patch): Json<PropertyPatch>,
) -> Result<Json<PropertyRow>, ApiError> {
    access.require(Capability::CanUpdateProperty)?;
    let row = property::update_property(&state.pool, property_id, access.viewer(), &patch).await?;
    Ok(Json(row))
}

/// `DELETE /api/properties/{id}`
pub async fn delete_property(
    State(state): State<AppState>,
    access: Access,
    Path(property_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    access.require(Capability::CanDeleteProperty)?;
    property::delete_property(&state.pool, property_id, access.viewer()).await?;
    tracing::info!(%property_id, user_id = %access.user.id, "property deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "properties_test.rs"]
mod tests;
