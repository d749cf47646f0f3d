//! Shared REST DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the server's JSON payloads field for field. Ids stay as
//! strings on this side; the browser never needs to parse them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use access::{AccessPermissions, RegistrationStatus, Role, User};
use serde::{Deserialize, Serialize};

/// `GET /api/auth/me` body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MeResponse {
    pub user: User,
    /// The server's derivation, used only to detect drift.
    pub permissions: AccessPermissions,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
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
    pub fn label(self) -> &'static str {
        match self {
            Self::Sale => "For sale",
            Self::Rent => "For rent",
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

/// A property listing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Property {
    pub id: String,
    pub agency_id: String,
    pub owner_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub operation: Operation,
    pub category_id: Option<String>,
    pub location_id: Option<String>,
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
    pub published: bool,
    pub listed_on: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PropertyPage {
    pub items: Vec<Property>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl PropertyPage {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page.saturating_mul(self.per_page) < self.total
    }
}

/// Listing search criteria as sent on the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertySearch {
    pub q: String,
    pub operation: Option<Operation>,
    pub category_id: Option<String>,
    pub location_id: Option<String>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub min_bedrooms: Option<i32>,
    pub page: i64,
}

/// Body for `POST /api/properties`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub operation: Operation,
    pub category_id: Option<String>,
    pub location_id: Option<String>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area_m2: f64,
    pub address: String,
    pub image_urls: Vec<String>,
    pub published: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Agency {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_on: Option<String>,
}

/// Body for `POST /api/agencies`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NewAgency {
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AgencyDashboard {
    pub agency: Agency,
    pub properties: Vec<Property>,
    pub published_count: usize,
    pub draft_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub province: String,
}

impl Location {
    /// "Name (Province)" label for selectors.
    #[must_use]
    pub fn label(&self) -> String {
        if self.province.is_empty() || self.province == self.name {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.province)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub placement: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserCounts {
    pub total: i64,
    pub pre_registered: i64,
    pub completed: i64,
    pub admins: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AdminOverview {
    pub users: UserCounts,
    pub agencies: i64,
    pub properties: i64,
    pub published_properties: i64,
}

/// User row in the admin list (`user` fields flattened by the server).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub registration_status: Option<RegistrationStatus>,
    pub role: Role,
    pub member_since: Option<String>,
}

/// Body for `PATCH /api/admin/users/{id}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AdminUserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_status: Option<RegistrationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// `{ "error": "..." }` body returned by every failing API call.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
