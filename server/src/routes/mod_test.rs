use super::*;
use axum::body::Body;
use axum::http::{Method, Request};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::state::test_helpers::test_app_state;

async fn send(method: Method, uri: &str, body: Option<serde_json::Value>) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    api_routes(test_app_state())
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response")
}

#[tokio::test]
async fn healthz_is_ok() {
    let res = send(Method::GET, "/healthz", None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn gated_routes_require_a_session() {
    let cases = [
        (Method::GET, "/api/auth/me"),
        (Method::POST, "/api/auth/logout"),
        (Method::GET, "/api/properties"),
        (Method::GET, "/api/properties/7f3c2a34-5d0e-4d3c-9a57-2f6c1c0e9b11"),
        (Method::DELETE, "/api/properties/7f3c2a34-5d0e-4d3c-9a57-2f6c1c0e9b11"),
        (Method::GET, "/api/agencies"),
        (Method::GET, "/api/agencies/dashboard"),
        (Method::GET, "/api/locations"),
        (Method::GET, "/api/categories"),
        (Method::GET, "/api/banners"),
        (Method::GET, "/api/admin/overview"),
        (Method::GET, "/api/admin/users"),
    ];
    for (method, uri) in cases {
        let res = send(method.clone(), uri, None).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn mutations_without_session_are_unauthorized() {
    let res = send(
        Method::POST,
        "/api/properties",
        Some(serde_json::json!({ "title": "Ático", "price_cents": 1, "operation": "sale" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = send(Method::POST, "/api/agencies", Some(serde_json::json!({ "name": "Turia" }))).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = send(
        Method::PATCH,
        "/api/admin/users/7f3c2a34-5d0e-4d3c-9a57-2f6c1c0e9b11",
        Some(serde_json::json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unauthorized_body_is_json_error() {
    let res = send(Method::GET, "/api/auth/me", None).await;
    let bytes = res.into_body().collect().await.expect("body").to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["error"], "authentication required");
}

#[tokio::test]
async fn request_code_rejects_malformed_email() {
    let res = send(
        Method::POST,
        "/api/auth/email/request-code",
        Some(serde_json::json!({ "email": "not-an-email" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let res = send(Method::GET, "/api/nope", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
