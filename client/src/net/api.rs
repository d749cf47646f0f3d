//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so fetch failures
//! degrade UI behavior without crashing hydration. Error strings prefer the
//! server's `{ "error": ... }` message and fall back to a status summary.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use access::User;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "hydrate")]
use super::types::ApiErrorBody;
use super::types::{
    AdminOverview, AdminUser, AdminUserPatch, Agency, AgencyDashboard, Banner, Category, Location, NewAgency,
    NewProperty, Property, PropertyPage, PropertySearch,
};

#[cfg(not(feature = "hydrate"))]
const SERVER_UNAVAILABLE: &str = "not available on server";

/// A failed call: HTTP status (0 for transport errors) plus message.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ApiFailure {
    status: u16,
    message: String,
}

impl From<ApiFailure> for String {
    fn from(failure: ApiFailure) -> Self {
        failure.message
    }
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
#[derive(Clone, Copy, Debug)]
enum Verb {
    Post,
    Patch,
    Delete,
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// User-facing message for a failed call.
fn failure_message(status: u16, server_message: Option<&str>) -> String {
    if let Some(message) = server_message.map(str::trim).filter(|m| !m.is_empty()) {
        return message.to_owned();
    }
    match status {
        401 => "Sign in to continue.".to_owned(),
        403 => "You do not have permission for this action.".to_owned(),
        404 => "Not found.".to_owned(),
        429 => "Too many requests; try again later.".to_owned(),
        _ => format!("request failed: {status}"),
    }
}

/// Percent-encode a query component (RFC 3986 unreserved set kept as-is).
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Build `/api/properties?...` for a search. Empty criteria are omitted.
fn properties_url(search: &PropertySearch) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    let q = search.q.trim();
    if !q.is_empty() {
        params.push(("q", q.to_owned()));
    }
    if let Some(op) = search.operation {
        params.push(("operation", op.as_str().to_owned()));
    }
    if let Some(id) = search.category_id.as_deref().filter(|v| !v.is_empty()) {
        params.push(("category_id", id.to_owned()));
    }
    if let Some(id) = search.location_id.as_deref().filter(|v| !v.is_empty()) {
        params.push(("location_id", id.to_owned()));
    }
    if let Some(min) = search.min_price_cents {
        params.push(("min_price", min.to_string()));
    }
    if let Some(max) = search.max_price_cents {
        params.push(("max_price", max.to_string()));
    }
    if let Some(beds) = search.min_bedrooms {
        params.push(("min_bedrooms", beds.to_string()));
    }
    if search.page > 1 {
        params.push(("page", search.page.to_string()));
    }

    if params.is_empty() {
        return "/api/properties".to_owned();
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("/api/properties?{query}")
}

fn property_url(id: &str) -> String {
    format!("/api/properties/{}", encode_component(id))
}

fn admin_user_url(id: &str) -> String {
    format!("/api/admin/users/{}", encode_component(id))
}

fn banners_url(placement: Option<&str>) -> String {
    match placement {
        Some(p) => format!("/api/banners?placement={}", encode_component(p)),
        None => "/api/banners".to_owned(),
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
async fn read_json<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiFailure> {
    let status = resp.status();
    if !resp.ok() {
        let body = resp.json::<ApiErrorBody>().await.ok();
        return Err(ApiFailure { status, message: failure_message(status, body.as_ref().map(|b| b.error.as_str())) });
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiFailure { status, message: e.to_string() })
}

#[cfg(feature = "hydrate")]
fn transport_failure(err: impl std::fmt::Display) -> ApiFailure {
    ApiFailure { status: 0, message: err.to_string() }
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(url)
            .send()
            .await
            .map_err(transport_failure)?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(ApiFailure { status: 0, message: SERVER_UNAVAILABLE.to_owned() })
    }
}

async fn send_json<B: Serialize, T: DeserializeOwned>(verb: Verb, url: &str, body: &B) -> Result<T, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        let builder = match verb {
            Verb::Post => gloo_net::http::Request::post(url),
            Verb::Patch => gloo_net::http::Request::patch(url),
            Verb::Delete => gloo_net::http::Request::delete(url),
        };
        let resp = builder
            .json(body)
            .map_err(transport_failure)?
            .send()
            .await
            .map_err(transport_failure)?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (verb, url, body);
        Err(ApiFailure { status: 0, message: SERVER_UNAVAILABLE.to_owned() })
    }
}

async fn send_empty(verb: Verb, url: &str) -> Result<(), ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        let builder = match verb {
            Verb::Post => gloo_net::http::Request::post(url),
            Verb::Patch => gloo_net::http::Request::patch(url),
            Verb::Delete => gloo_net::http::Request::delete(url),
        };
        let resp = builder.send().await.map_err(transport_failure)?;
        if resp.ok() {
            return Ok(());
        }
        let status = resp.status();
        let body = resp.json::<ApiErrorBody>().await.ok();
        Err(ApiFailure { status, message: failure_message(status, body.as_ref().map(|b| b.error.as_str())) })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (verb, url);
        Err(ApiFailure { status: 0, message: SERVER_UNAVAILABLE.to_owned() })
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    let me = get_json::<super::types::MeResponse>("/api/auth/me").await.ok()?;
    #[cfg(feature = "hydrate")]
    {
        let local = access::AccessPermissions::for_user(&me.user);
        if local != me.permissions {
            log::warn!("server and client permissions differ for {}", me.user.email);
        }
    }
    Some(me.user)
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    if let Err(failure) = send_empty(Verb::Post, "/api/auth/logout").await {
        #[cfg(feature = "hydrate")]
        log::warn!("logout failed: {}", failure.message);
        #[cfg(not(feature = "hydrate"))]
        let _ = failure;
    }
}

#[derive(serde::Deserialize)]
struct RequestCodeResponse {
    code: Option<String>,
}

/// Request a 6-character email login code via `POST /api/auth/email/request-code`.
///
/// Returns the code itself when the server is configured to echo codes.
///
/// # Errors
///
/// Returns an error string if the request fails or is throttled.
pub async fn request_email_login_code(email: &str) -> Result<Option<String>, String> {
    let payload = serde_json::json!({ "email": email });
    let body: RequestCodeResponse = send_json(Verb::Post, "/api/auth/email/request-code", &payload).await?;
    Ok(body.code)
}

/// Verify an email login code via `POST /api/auth/email/verify-code`.
///
/// # Errors
///
/// Returns an error string if the code is rejected or the request fails.
pub async fn verify_email_login_code(email: &str, code: &str) -> Result<User, String> {
    let payload = serde_json::json!({ "email": email, "code": code });
    let me: super::types::MeResponse = send_json(Verb::Post, "/api/auth/email/verify-code", &payload).await?;
    Ok(me.user)
}

// =============================================================================
// MARKETPLACE
// =============================================================================

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_properties(search: &PropertySearch) -> Result<PropertyPage, String> {
    Ok(get_json(&properties_url(search)).await?)
}

/// # Errors
///
/// Returns an error string if the listing is missing or hidden.
pub async fn fetch_property(id: &str) -> Result<Property, String> {
    Ok(get_json(&property_url(id)).await?)
}

/// # Errors
///
/// Returns an error string if validation or the capability check fails.
pub async fn create_property(body: &NewProperty) -> Result<Property, String> {
    Ok(send_json(Verb::Post, "/api/properties", body).await?)
}

/// # Errors
///
/// Returns an error string if the caller may not delete the listing.
pub async fn delete_property(id: &str) -> Result<(), String> {
    Ok(send_empty(Verb::Delete, &property_url(id)).await?)
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_locations() -> Result<Vec<Location>, String> {
    Ok(get_json("/api/locations").await?)
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    Ok(get_json("/api/categories").await?)
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_banners(placement: Option<&str>) -> Result<Vec<Banner>, String> {
    Ok(get_json(&banners_url(placement)).await?)
}

/// Fetch the caller's agency dashboard. `Ok(None)` means no agency yet.
///
/// # Errors
///
/// Returns an error string for any failure other than "no agency".
pub async fn fetch_agency_dashboard() -> Result<Option<AgencyDashboard>, String> {
    match get_json("/api/agencies/dashboard").await {
        Ok(dashboard) => Ok(Some(dashboard)),
        Err(ApiFailure { status: 404, .. }) => Ok(None),
        Err(failure) => Err(failure.into()),
    }
}

/// # Errors
///
/// Returns an error string if the caller already owns an agency.
pub async fn create_agency(body: &NewAgency) -> Result<Agency, String> {
    Ok(send_json(Verb::Post, "/api/agencies", body).await?)
}

// =============================================================================
// ADMIN
// =============================================================================

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_admin_overview() -> Result<AdminOverview, String> {
    Ok(get_json("/api/admin/overview").await?)
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_admin_users() -> Result<Vec<AdminUser>, String> {
    Ok(get_json("/api/admin/users").await?)
}

/// # Errors
///
/// Returns an error string if the update is rejected.
pub async fn update_admin_user(id: &str, patch: AdminUserPatch) -> Result<AdminUser, String> {
    Ok(send_json(Verb::Patch, &admin_user_url(id), &patch).await?)
}
