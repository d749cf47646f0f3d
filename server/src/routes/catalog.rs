//! Reference data routes: locations, categories, banners.

use access::Capability;
use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;

use super::enforce::Access;
use super::error::ApiError;
use crate::services::catalog::{self, Banner, Category, Location};
use crate::state::AppState;

/// `GET /api/locations`
pub async fn list_locations(State(state): State<AppState>, access: Access) -> Result<Json<Vec<Location>>, ApiError> {
    access.require(Capability::CanViewLocations)?;
    Ok(Json(catalog::list_locations(&state.pool).await?))
}

/// `GET /api/categories`
pub async fn list_categories(State(state): State<AppState>, access: Access) -> Result<Json<Vec<Category>>, ApiError> {
    access.require(Capability::CanViewCategories)?;
    Ok(Json(catalog::list_categories(&state.pool).await?))
}

#[derive(Deserialize)]
pub struct BannerQuery {
    placement: Option<String>,
}

/// `GET /api/banners?placement=home`
pub async fn list_banners(
    State(state): State<AppState>,
    access: Access,
    Query(query): Query<BannerQuery>,
) -> Result<Json<Vec<Banner>>, ApiError> {
    access.require(Capability::CanViewBanners)?;
    let placement = query.placement.as_deref().map(str::trim).filter(|p| !p.is_empty());
    Ok(Json(catalog::list_banners(&state.pool, placement).await?))
}
