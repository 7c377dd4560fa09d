//! Access Control Middleware.
//! Enforces the `requires_auth` / `requires_acl` settings of the matched route.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::config::AccessConfig;
use crate::routing::RouteGroup;
use crate::security::acl::Acl;

/// State required for access control.
#[derive(Clone)]
pub struct AccessControlState {
    /// Group whose route settings are consulted.
    pub group: RouteGroup,
    pub acl: Arc<Acl>,
    pub user_header: String,
    pub role_header: String,
}

impl AccessControlState {
    pub fn new(group: RouteGroup, config: &AccessConfig) -> Self {
        Self {
            group,
            acl: Arc::new(Acl::from_config(&config.roles)),
            user_header: config.user_header.clone(),
            role_header: config.role_header.clone(),
        }
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn access_control_middleware(
    State(state): State<AccessControlState>,
    req: Request,
    next: Next,
) -> Response {
    // Routes without settings on this group pass through.
    let Some(setting) = state.group.lookup_current(&req) else {
        return next.run(req).await;
    };

    if setting.requires_auth && header(req.headers(), &state.user_header).is_empty() {
        tracing::debug!(path = %setting.full_path, "Rejected: not signed in");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": "not_sign_in", "message": "You haven't sign in."})),
        )
            .into_response();
    }

    if setting.requires_acl {
        let role = header(req.headers(), &state.role_header);
        if !state.acl.is_allowed(&[role], &setting.full_path) {
            tracing::debug!(path = %setting.full_path, role, "Rejected: no access");
            return (
                StatusCode::FORBIDDEN,
                Json(json!({"code": "no_access", "message": "You have no access to visit this path"})),
            )
                .into_response();
        }
    }

    next.run(req).await
}
