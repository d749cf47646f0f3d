//! Agencies: the publishing identity behind property listings.
//!
//! Each user owns at most one agency. Creating a second one is a conflict,
//! enforced both here and by the `owner_id UNIQUE` constraint.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::property::{self, PropertyError, PropertyRow};

const MAX_NAME_LEN: usize = 120;
const AGENCY_COLUMNS: &str = "id, owner_id, name, description, phone, email, to_char(created_at, 'YYYY-MM-DD') AS created_on";

#[derive(Debug, thiserror::Error)]
pub enum AgencyError {
    #[error("user {0} already owns an agency")]
    AlreadyExists(Uuid),
    #[error("no agency for user {0}")]
    NotFound(Uuid),
    #[error("invalid agency: {0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<PropertyError> for AgencyError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::Database(db) => Self::Database(db),
            other => Self::Invalid(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgencyRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_on: Option<String>,
}

fn agency_from_row(row: &PgRow) -> AgencyRow {
    AgencyRow {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        description: row.get("description"),
        phone: row.get("phone"),
        email: row.get("email"),
        created_on: row.get("created_on"),
    }
}

/// Body for creating an agency.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAgency {
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl NewAgency {
    /// # Errors
    ///
    /// Returns `AgencyError::Invalid` for a blank or oversized name.
    pub fn validate(&self) -> Result<(), AgencyError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AgencyError::Invalid("name is required".into()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AgencyError::Invalid(format!("name exceeds {MAX_NAME_LEN} characters")));
        }
        Ok(())
    }
}

/// Trim optional text and drop it when blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The caller's agency with its listings.
#[derive(Debug, Clone, Serialize)]
pub struct AgencyDashboard {
    pub agency: AgencyRow,
    pub properties: Vec<PropertyRow>,
    pub published_count: usize,
    pub draft_count: usize,
}

impl AgencyDashboard {
    #[must_use]
    pub fn new(agency: AgencyRow, properties: Vec<PropertyRow>) -> Self {
        let published_count = properties.iter().filter(|p| p.published).count();
        let draft_count = properties.len() - published_count;
        Self { agency, properties, published_count, draft_count }
    }
}

/// Create the owner's agency.
///
/// # Errors
///
/// Returns `AlreadyExists` if the owner already has one.
pub async fn create_agency(pool: &PgPool, owner_id: Uuid, input: &NewAgency) -> Result<AgencyRow, AgencyError> {
    input.validate()?;

    let row = sqlx::query(&format!(
        "INSERT INTO agencies (owner_id, name, description, phone, email)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (owner_id) DO NOTHING
         RETURNING {AGENCY_COLUMNS}"
    ))
    .bind(owner_id)
    .bind(input.name.trim())
    .bind(non_blank(input.description.as_deref()))
    .bind(non_blank(input.phone.as_deref()))
    .bind(non_blank(input.email.as_deref()))
    .fetch_optional(pool)
    .await?
    .ok_or(AgencyError::AlreadyExists(owner_id))?;

    Ok(agency_from_row(&row))
}

/// All agencies, alphabetically.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_agencies(pool: &PgPool) -> Result<Vec<AgencyRow>, AgencyError> {
    let rows = sqlx::query(&format!("SELECT {AGENCY_COLUMNS} FROM agencies ORDER BY name, id"))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(agency_from_row).collect())
}

/// The agency owned by `owner_id`.
///
/// # Errors
///
/// Returns `NotFound` if the user has no agency.
pub async fn agency_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<AgencyRow, AgencyError> {
    let row = sqlx::query(&format!("SELECT {AGENCY_COLUMNS} FROM agencies WHERE owner_id = $1"))
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AgencyError::NotFound(owner_id))?;
    Ok(agency_from_row(&row))
}

/// Dashboard for the caller's agency.
///
/// # Errors
///
/// Returns `NotFound` if the user has no agency.
pub async fn dashboard(pool: &PgPool, owner_id: Uuid) -> Result<AgencyDashboard, AgencyError> {
    let agency = agency_for_owner(pool, owner_id).await?;
    let properties = property::list_agency_properties(pool, agency.id).await?;
    Ok(AgencyDashboard::new(agency, properties))
}

/// Count of agencies for the admin overview.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn count_agencies(pool: &PgPool) -> Result<i64, AgencyError> {
    let row = sqlx::query("SELECT COUNT(*) AS total FROM agencies").fetch_one(pool).await?;
    Ok(row.get("total"))
}

#[cfg(test)]
#[path = "agency_test.rs"]
mod tests;
