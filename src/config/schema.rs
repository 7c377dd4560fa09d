//! Configuration schema definitions.
//!
//! This module defines the configuration of the example server. All types
//! derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

/// Root configuration for the example server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Header names and roles used by the access-control middleware.
    pub access: AccessConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "axum_route_ext=debug,tower_http=debug".to_string(),
        }
    }
}

/// Access-control configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Header whose presence marks a signed-in caller.
    pub user_header: String,

    /// Header carrying the caller's role id.
    pub role_header: String,

    /// Roles and the route templates they may access.
    pub roles: Vec<RoleConfig>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            user_header: "user_id".to_string(),
            role_header: "role_id".to_string(),
            roles: default_roles(),
        }
    }
}

/// One role of the access-control list.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RoleConfig {
    /// Role identifier, matched against the role header.
    pub id: String,

    /// Human-readable role name.
    #[serde(default)]
    pub name: String,

    /// Absolute route templates the role may access.
    #[serde(default)]
    pub permissions: Vec<String>,
}

fn role(id: &str, name: &str, permissions: &[&str]) -> RoleConfig {
    RoleConfig {
        id: id.to_string(),
        name: name.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    }
}

fn default_roles() -> Vec<RoleConfig> {
    vec![
        role(
            "1",
            "Administrator",
            &["/admin/admin/list", "/admin/admin/edit/{id}", "/admin/admin/del/{id}"],
        ),
        role(
            "editor",
            "Editor",
            &["/admin/article/list", "/admin/article/edit/{id}", "/admin/article/del/{id}"],
        ),
        role(
            "video_auditor",
            "Video auditor",
            &["/admin/video/list", "/admin/video/edit/{id}", "/admin/video/del/{id}"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(config.access.user_header, "user_id");
        assert_eq!(config.access.roles.len(), 3);
    }

    #[test]
    fn test_roles_replace_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [[access.roles]]
            id = "editor"
            permissions = ["/admin/article/list"]
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.access.role_header, "role_id");
        assert_eq!(
            config.access.roles,
            vec![RoleConfig {
                id: "editor".into(),
                name: String::new(),
                permissions: vec!["/admin/article/list".into()],
            }]
        );
    }
}
