//! Property listings: search, detail, and owner-scoped mutations.
//!
//! DESIGN
//! ======
//! Capability checks happen in the route layer before any call lands here.
//! This module only adds the ownership rule: a listing may be changed by
//! the user who created it or by an administrator.
//!
//! Unpublished listings are visible to their owner and administrators only.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;
const MAX_TITLE_LEN: usize = 200;
const MAX_IMAGES: usize = 30;

const PROPERTY_COLUMNS: &str = "p.id, p.agency_id, p.owner_id, p.title, p.description, p.price_cents, p.operation,
     p.category_id, p.location_id, p.bedrooms, p.bathrooms, p.area_m2, p.address, p.image_urls,
     p.published, to_char(p.created_at, 'YYYY-MM-DD') AS listed_on";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("property not found: {0}")]
    NotFound(Uuid),
    #[error("not the owner of property {0}")]
    NotOwner(Uuid),
    #[error("an agency is required before publishing properties")]
    NoAgency,
    #[error("invalid property: {0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Sale,
    Rent,
}

impl Operation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Rent => "rent",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "sale" => Some(Self::Sale),
            "rent" => Some(Self::Rent),
            _ => None,
        }
    }
}

/// A listing as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyRow {
    pub id: Uuid,
    pub agency_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub operation: Operation,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area_m2: f64,
    pub address: String,
    pub image_urls: Vec<String>,
    pub published: bool,
    pub listed_on: Option<String>,
}

fn property_from_row(row: &PgRow) -> PropertyRow {
    let operation: String = row.get("operation");
    let Json(image_urls): Json<Vec<String>> = row.get("image_urls");
    PropertyRow {
        id: row.get("id"),
        agency_id: row.get("agency_id"),
        owner_id: row.get("owner_id"),
        title: row.get("title"),
        description: row.get("description"),
        price_cents: row.get("price_cents"),
        operation: Operation::parse(&operation).unwrap_or(Operation::Sale),
        category_id: row.get("category_id"),
        location_id: row.get("location_id"),
        bedrooms: row.get("bedrooms"),
        bathrooms: row.get("bathrooms"),
        area_m2: row.get("area_m2"),
        address: row.get("address"),
        image_urls,
        published: row.get("published"),
        listed_on: row.get("listed_on"),
    }
}

/// Who is asking. Drives the unpublished-listing and ownership rules.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Viewer {
    fn may_modify(self, owner_id: Uuid) -> bool {
        self.is_admin || self.user_id == owner_id
    }
}

// =============================================================================
// SEARCH
// =============================================================================

/// Listing filters. Every field is optional; absent means unfiltered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyFilter {
    pub q: Option<String>,
    pub operation: Option<Operation>,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PropertyFilter {
    /// Whether any search criterion (beyond paging) is present.
    #[must_use]
    pub fn has_search_terms(&self) -> bool {
        self.search_text().is_some()
            || self.operation.is_some()
            || self.category_id.is_some()
            || self.location_id.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.min_bedrooms.is_some()
    }

    fn search_text(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// 1-based page number, clamped to at least 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, defaulting to `DEFAULT_PER_PAGE` and clamped to `1..=MAX_PER_PAGE`.
    #[must_use]
    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.per_page())
    }

    fn push_conditions(&self, builder: &mut QueryBuilder<'_, Postgres>, viewer: Viewer) {
        builder.push(" WHERE TRUE");
        if !viewer.is_admin {
            builder.push(" AND (p.published OR p.owner_id = ");
            builder.push_bind(viewer.user_id);
            builder.push(")");
        }
        if let Some(q) = self.search_text() {
            let pattern = format!("%{}%", escape_like(q));
            builder.push(" AND (p.title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR p.address ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(operation) = self.operation {
            builder.push(" AND p.operation = ");
            builder.push_bind(operation.as_str());
        }
        if let Some(category_id) = self.category_id {
            builder.push(" AND p.category_id = ");
            builder.push_bind(category_id);
        }
        if let Some(location_id) = self.location_id {
            builder.push(" AND p.location_id = ");
            builder.push_bind(location_id);
        }
        if let Some(min_price) = self.min_price {
            builder.push(" AND p.price_cents >= ");
            builder.push_bind(min_price);
        }
        if let Some(max_price) = self.max_price {
            builder.push(" AND p.price_cents <= ");
            builder.push_bind(max_price);
        }
        if let Some(min_bedrooms) = self.min_bedrooms {
            builder.push(" AND p.bedrooms >= ");
            builder.push_bind(min_bedrooms);
        }
    }
}

/// Escape `%`, `_` and `\` so user text matches literally inside `ILIKE`.
#[must_use]
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyPage {
    pub items: Vec<PropertyRow>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

/// Search listings visible to `viewer`.
///
/// # Errors
///
/// Returns a database error if either query fails.
pub async fn search_properties(
    pool: &PgPool,
    filter: &PropertyFilter,
    viewer: Viewer,
) -> Result<PropertyPage, PropertyError> {
    let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM properties p");
    filter.push_conditions(&mut count, viewer);
    let total: i64 = count.build().fetch_one(pool).await?.get("total");

    let mut select = QueryBuilder::new(format!("SELECT {PROPERTY_COLUMNS} FROM properties p"));
    filter.push_conditions(&mut select, viewer);
    select.push(" ORDER BY p.created_at DESC, p.id LIMIT ");
    select.push_bind(filter.per_page());
    select.push(" OFFSET ");
    select.push_bind(filter.offset());
    let rows = select.build().fetch_all(pool).await?;

    Ok(PropertyPage {
        items: rows.iter().map(property_from_row).collect(),
        page: filter.page(),
        per_page: filter.per_page(),
        total,
    })
}

/// Fetch one listing, hiding unpublished ones from non-owners.
///
/// # Errors
///
/// Returns `NotFound` if missing or hidden from `viewer`.
pub async fn get_property(pool: &PgPool, property_id: Uuid, viewer: Viewer) -> Result<PropertyRow, PropertyError> {
    let row = sqlx::query(&format!("SELECT {PROPERTY_COLUMNS} FROM properties p WHERE p.id = $1"))
        .bind(property_id)
        .fetch_optional(pool)
        .await?
        .ok_or(PropertyError::NotFound(property_id))?;
    let property = property_from_row(&row);
    if !property.published && !viewer.may_modify(property.owner_id) {
        return Err(PropertyError::NotFound(property_id));
    }
    Ok(property)
}

/// All listings for an agency (dashboard view, includes unpublished).
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_agency_properties(pool: &PgPool, agency_id: Uuid) -> Result<Vec<PropertyRow>, PropertyError> {
    let rows = sqlx::query(&format!(
        "SELECT {PROPERTY_COLUMNS} FROM properties p WHERE p.agency_id = $1 ORDER BY p.created_at DESC"
    ))
    .bind(agency_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(property_from_row).collect())
}

// =============================================================================
// MUTATIONS
// =============================================================================

/// Body for creating a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub operation: Operation,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: i32,
    #[serde(default)]
    pub area_m2: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl NewProperty {
    /// Check field ranges; returns the first problem found.
    ///
    /// # Errors
    ///
    /// Returns `PropertyError::Invalid` describing the offending field.
    pub fn validate(&self) -> Result<(), PropertyError> {
        validate_title(&self.title)?;
        validate_numbers(Some(self.price_cents), Some(self.area_m2), Some(self.bedrooms), Some(self.bathrooms))?;
        validate_images(&self.image_urls)
    }
}

/// Partial update body. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub operation: Option<Operation>,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_m2: Option<f64>,
    pub address: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub published: Option<bool>,
}

impl PropertyPatch {
    /// # Errors
    ///
    /// Returns `PropertyError::Invalid` describing the offending field.
    pub fn validate(&self) -> Result<(), PropertyError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_numbers(self.price_cents, self.area_m2, self.bedrooms, self.bathrooms)?;
        if let Some(images) = &self.image_urls {
            validate_images(images)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), PropertyError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(PropertyError::Invalid("title is required".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(PropertyError::Invalid(format!("title exceeds {MAX_TITLE_LEN} characters")));
    }
    Ok(())
}

fn validate_numbers(
    price_cents: Option<i64>,
    area_m2: Option<f64>,
    bedrooms: Option<i32>,
    bathrooms: Option<i32>,
) -> Result<(), PropertyError> {
    if price_cents.is_some_and(|p| p < 0) {
        return Err(PropertyError::Invalid("price must not be negative".into()));
    }
    if area_m2.is_some_and(|a| !a.is_finite() || a < 0.0) {
        return Err(PropertyError::Invalid("area must be a non-negative number".into()));
    }
    if bedrooms.is_some_and(|n| n < 0) || bathrooms.is_some_and(|n| n < 0) {
        return Err(PropertyError::Invalid("room counts must not be negative".into()));
    }
    Ok(())
}

fn validate_images(images: &[String]) -> Result<(), PropertyError> {
    if images.len() > MAX_IMAGES {
        return Err(PropertyError::Invalid(format!("at most {MAX_IMAGES} images")));
    }
    if images.iter().any(|url| !(url.starts_with("https://") || url.starts_with("http://"))) {
        return Err(PropertyError::Invalid("image urls must be http(s)".into()));
    }
    Ok(())
}

/// Insert a listing under the owner's agency.
///
/// # Errors
///
/// Returns `NoAgency` if the owner has no agency, `Invalid` on bad input.
pub async fn create_property(pool: &PgPool, owner_id: Uuid, input: &NewProperty) -> Result<PropertyRow, PropertyError> {
    input.validate()?;

    let agency_id: Uuid = sqlx::query("SELECT id FROM agencies WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .ok_or(PropertyError::NoAgency)?
        .get("id");

    let row = sqlx::query(
        r"INSERT INTO properties
              (agency_id, owner_id, title, description, price_cents, operation, category_id, location_id,
               bedrooms, bathrooms, area_m2, address, image_urls, published)
          VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
          RETURNING id",
    )
    .bind(agency_id)
    .bind(owner_id)
    .bind(input.title.trim())
    .bind(&input.description)
    .bind(input.price_cents)
    .bind(input.operation.as_str())
    .bind(input.category_id)
    .bind(input.location_id)
    .bind(input.bedrooms)
    .bind(input.bathrooms)
    .bind(input.area_m2)
    .bind(&input.address)
    .bind(Json(&input.image_urls))
    .bind(input.published)
    .fetch_one(pool)
    .await?;

    let id: Uuid = row.get("id");
    get_property(pool, id, Viewer { user_id: owner_id, is_admin: false }).await
}

async fn ensure_may_modify(pool: &PgPool, property_id: Uuid, viewer: Viewer) -> Result<(), PropertyError> {
    let owner_id: Uuid = sqlx::query("SELECT owner_id FROM properties WHERE id = $1")
        .bind(property_id)
        .fetch_optional(pool)
        .await?
        .ok_or(PropertyError::NotFound(property_id))?
        .get("owner_id");
    if !viewer.may_modify(owner_id) {
        return Err(PropertyError::NotOwner(property_id));
    }
    Ok(())
}

/// Apply a partial update.
///
/// # Errors
///
/// Returns `NotFound`, `NotOwner`, or `Invalid`.
pub async fn update_property(
    pool: &PgPool,
    property_id: Uuid,
    viewer: Viewer,
    patch: &PropertyPatch,
) -> Result<PropertyRow, PropertyError> {
    patch.validate()?;
    ensure_may_modify(pool, property_id, viewer).await?;

    sqlx::query(
        r"UPDATE properties SET
              title       = COALESCE($2, title),
              description = COALESCE($3, description),
              price_cents = COALESCE($4, price_cents),
              operation   = COALESCE($5, operation),
              category_id = COALESCE($6, category_id),
              location_id = COALESCE($7, location_id),
              bedrooms    = COALESCE($8, bedrooms),
              bathrooms   = COALESCE($9, bathrooms),
              area_m2     = COALESCE($10, area_m2),
              address     = COALESCE($11, address),
              image_urls  = COALESCE($12, image_urls),
              published   = COALESCE($13, published),
              updated_at  = now()
          WHERE id = $1",
    )
    .bind(property_id)
    .bind(patch.title.as_deref().map(str::trim))
    .bind(patch.description.as_deref())
    .bind(patch.price_cents)
    .bind(patch.operation.map(Operation::as_str))
    .bind(patch.category_id)
    .bind(patch.location_id)
    .bind(patch.bedrooms)
    .bind(patch.bathrooms)
    .bind(patch.area_m2)
    .bind(patch.address.as_deref())
    .bind(patch.image_urls.as_ref().map(Json))
    .bind(patch.published)
    .execute(pool)
    .await?;

    get_property(pool, property_id, viewer).await
}

/// Delete a listing.
///
/// # Errors
///
/// Returns `NotFound` or `NotOwner`.
pub async fn delete_property(pool: &PgPool, property_id: Uuid, viewer: Viewer) -> Result<(), PropertyError> {
    ensure_may_modify(pool, property_id, viewer).await?;
    sqlx::query("DELETE FROM properties WHERE id = $1")
        .bind(property_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "property_test.rs"]
mod tests;
