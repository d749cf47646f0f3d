//! Capability model shared by the `server` and `client` crates.
//!
//! Both sides derive the same [`AccessPermissions`] from the same user record,
//! so the UI can gate surfaces and the API can re-check every gated action
//! with identical rules. Derivation is a pure function of an
//! [`AuthSnapshot`]: no I/O, no errors, no hidden state.
//!
//! Gating in the browser is advisory only. The API must call
//! [`AccessPermissions::allows`] itself before performing any mutation.

use serde::{Deserialize, Serialize};

// =============================================================================
// USER
// =============================================================================

/// How far a user has progressed through account setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationStatus {
    /// Authenticated but without a completed registration; browse-only.
    #[default]
    PreRegistered,
    /// Full account setup; may publish and manage listings.
    Completed,
}

impl RegistrationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreRegistered => "pre-registered",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pre-registered" => Some(Self::PreRegistered),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Role claim carried on the user record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "member" => Some(Self::Member),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// The identity fields the deriver reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// `None` when the record predates registration tracking.
    #[serde(default)]
    pub registration_status: Option<RegistrationStatus>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Registration status with the `pre-registered` fallback applied.
    #[must_use]
    pub fn effective_status(&self) -> RegistrationStatus {
        self.registration_status.unwrap_or_default()
    }
}

// =============================================================================
// AUTH SNAPSHOT
// =============================================================================

/// Authentication result observed at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl AuthSnapshot {
    /// Snapshot for a resolved session with a known user.
    #[must_use]
    pub fn signed_in(user: User) -> Self {
        Self { is_loading: false, is_authenticated: true, user: Some(user) }
    }

    /// Snapshot for a resolved session without a user.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Snapshot while the session check is still in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self { is_loading: true, ..Self::default() }
    }

    fn active_user(&self) -> Option<&User> {
        if self.is_loading || !self.is_authenticated {
            return None;
        }
        self.user.as_ref()
    }
}

// =============================================================================
// CAPABILITY
// =============================================================================

/// One gated action or surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    CanViewProperties,
    CanViewAgencies,
    CanViewLocations,
    CanViewCategories,
    CanViewBanners,
    CanSearchProperties,
    CanViewDetailedProperty,
    CanAccessAgencyDashboard,
    CanCreateAgency,
    CanCreateProperty,
    CanUpdateProperty,
    CanDeleteProperty,
    CanAccessAdminDashboard,
    CanViewFullFeatures,
}

impl Capability {
    pub const ALL: [Self; 14] = [
        Self::CanViewProperties,
        Self::CanViewAgencies,
        Self::CanViewLocations,
        Self::CanViewCategories,
        Self::CanViewBanners,
        Self::CanSearchProperties,
        Self::CanViewDetailedProperty,
        Self::CanAccessAgencyDashboard,
        Self::CanCreateAgency,
        Self::CanCreateProperty,
        Self::CanUpdateProperty,
        Self::CanDeleteProperty,
        Self::CanAccessAdminDashboard,
        Self::CanViewFullFeatures,
    ];

    /// Read-only browsing capabilities granted to every signed-in user.
    pub const BROWSING: [Self; 7] = [
        Self::CanViewProperties,
        Self::CanViewAgencies,
        Self::CanViewLocations,
        Self::CanViewCategories,
        Self::CanViewBanners,
        Self::CanSearchProperties,
        Self::CanViewDetailedProperty,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CanViewProperties => "canViewProperties",
            Self::CanViewAgencies => "canViewAgencies",
            Self::CanViewLocations => "canViewLocations",
            Self::CanViewCategories => "canViewCategories",
            Self::CanViewBanners => "canViewBanners",
            Self::CanSearchProperties => "canSearchProperties",
            Self::CanViewDetailedProperty => "canViewDetailedProperty",
            Self::CanAccessAgencyDashboard => "canAccessAgencyDashboard",
            Self::CanCreateAgency => "canCreateAgency",
            Self::CanCreateProperty => "canCreateProperty",
            Self::CanUpdateProperty => "canUpdateProperty",
            Self::CanDeleteProperty => "canDeleteProperty",
            Self::CanAccessAdminDashboard => "canAccessAdminDashboard",
            Self::CanViewFullFeatures => "canViewFullFeatures",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cap| cap.as_str() == raw)
    }

    #[must_use]
    pub fn is_browsing(self) -> bool {
        Self::BROWSING.contains(&self)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PERMISSIONS
// =============================================================================

/// Fixed-shape capability record derived from an [`AuthSnapshot`].
///
/// Never persisted. Recompute it whenever the snapshot changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPermissions {
    pub can_view_properties: bool,
    pub can_view_agencies: bool,
    pub can_view_locations: bool,
    pub can_view_categories: bool,
    pub can_view_banners: bool,
    pub can_search_properties: bool,
    pub can_view_detailed_property: bool,
    pub can_access_agency_dashboard: bool,
    pub can_create_agency: bool,
    pub can_create_property: bool,
    pub can_update_property: bool,
    pub can_delete_property: bool,
    pub can_access_admin_dashboard: bool,
    pub can_view_full_features: bool,
    pub registration_status: Option<RegistrationStatus>,
}

impl AccessPermissions {
    /// Permissions with every flag false and no registration status.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Derive the capability set for an authentication snapshot.
    ///
    /// - Loading, signed out, or missing user: nothing is granted.
    /// - `pre-registered` (also the fallback for a missing status): browsing only.
    /// - `completed`: everything, with the admin dashboard reserved for
    ///   users carrying the [`Role::Admin`] claim.
    #[must_use]
    pub fn derive(auth: &AuthSnapshot) -> Self {
        let Some(user) = auth.active_user() else {
            return Self::none();
        };

        let status = user.effective_status();
        let browsing = Self {
            can_view_properties: true,
            can_view_agencies: true,
            can_view_locations: true,
            can_view_categories: true,
            can_view_banners: true,
            can_search_properties: true,
            can_view_detailed_property: true,
            registration_status: Some(status),
            ..Self::none()
        };

        match status {
            RegistrationStatus::PreRegistered => browsing,
            RegistrationStatus::Completed => Self {
                can_access_agency_dashboard: true,
                can_create_agency: true,
                can_create_property: true,
                can_update_property: true,
                can_delete_property: true,
                can_access_admin_dashboard: user.role == Role::Admin,
                can_view_full_features: true,
                ..browsing
            },
        }
    }

    /// Derive permissions for a signed-in user.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self::derive(&AuthSnapshot::signed_in(user.clone()))
    }

    /// Look up a single capability flag.
    #[must_use]
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::CanViewProperties => self.can_view_properties,
            Capability::CanViewAgencies => self.can_view_agencies,
            Capability::CanViewLocations => self.can_view_locations,
            Capability::CanViewCategories => self.can_view_categories,
            Capability::CanViewBanners => self.can_view_banners,
            Capability::CanSearchProperties => self.can_search_properties,
            Capability::CanViewDetailedProperty => self.can_view_detailed_property,
            Capability::CanAccessAgencyDashboard => self.can_access_agency_dashboard,
            Capability::CanCreateAgency => self.can_create_agency,
            Capability::CanCreateProperty => self.can_create_property,
            Capability::CanUpdateProperty => self.can_update_property,
            Capability::CanDeleteProperty => self.can_delete_property,
            Capability::CanAccessAdminDashboard => self.can_access_admin_dashboard,
            Capability::CanViewFullFeatures => self.can_view_full_features,
        }
    }

    /// Every capability currently granted, in declaration order.
    #[must_use]
    pub fn granted(&self) -> Vec<Capability> {
        Capability::ALL.into_iter().filter(|cap| self.allows(*cap)).collect()
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
