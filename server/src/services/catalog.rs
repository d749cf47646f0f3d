//! Read-only reference data: locations, categories, and banners.

use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub province: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub placement: String,
}

/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_locations(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
    let rows = sqlx::query("SELECT id, name, province FROM locations ORDER BY province, name")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .map(|row| Location { id: row.get("id"), name: row.get("name"), province: row.get("province") })
        .collect())
}

/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    let rows = sqlx::query("SELECT id, name FROM categories ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(|row| Category { id: row.get("id"), name: row.get("name") }).collect())
}

/// Active banners, optionally limited to one placement slot.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_banners(pool: &PgPool, placement: Option<&str>) -> Result<Vec<Banner>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, title, image_url, link_url, placement FROM banners
         WHERE active AND ($1::text IS NULL OR placement = $1)
         ORDER BY title, id",
    )
    .bind(placement)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .iter()
        .map(|row| Banner {
            id: row.get("id"),
            title: row.get("title"),
            image_url: row.get("image_url"),
            link_url: row.get("link_url"),
            placement: row.get("placement"),
        })
        .collect())
}

/// Count of listings for the admin overview, split by visibility.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn count_properties(pool: &PgPool) -> Result<(i64, i64), sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS total, COUNT(*) FILTER (WHERE published) AS published FROM properties",
    )
    .fetch_one(pool)
    .await?;
    Ok((row.get("total"), row.get("published")))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
