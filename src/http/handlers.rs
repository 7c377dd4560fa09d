//! Handlers of the example application.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::routing::FallbackRequest;

pub async fn handle_admin() -> Json<serde_json::Value> {
    Json(json!({"code": "API", "message": "hello /admin"}))
}

pub async fn handle_web() -> Html<&'static str> {
    Html("<div>A sample page</div>")
}

/// Default fallback: a plain HTML page.
pub fn not_found_page(_req: &FallbackRequest) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html("<html><head><title>404 Not Found</title></head><body><h1>404 Not Found</h1></body></html>"),
    )
        .into_response()
}

pub fn admin_not_found(_req: &FallbackRequest) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"code": "404_not_found", "msg": "Path is 404 not found under /admin"})),
    )
        .into_response()
}

/// The web group answers unknown API paths with 200 and an error code.
pub fn web_not_found(_req: &FallbackRequest) -> Response {
    Json(json!({"code": "not found", "message": "This API was not found"})).into_response()
}

/// Group middleware for `/web`.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    tracing::info!(%method, %path, status = %response.status(), "web request");
    response
}
