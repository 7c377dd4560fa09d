//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address parses
//! - Check role ids are present and unique
//! - Check permissions are absolute route templates
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    BindAddress(String),

    #[error("role at position {0} has an empty id")]
    EmptyRoleId(usize),

    #[error("duplicate role id `{0}`")]
    DuplicateRoleId(String),

    #[error("permission `{permission}` of role `{role}` must start with `/`")]
    RelativePermission { role: String, permission: String },
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for (position, role) in config.access.roles.iter().enumerate() {
        if role.id.is_empty() {
            errors.push(ValidationError::EmptyRoleId(position));
        } else if !seen.insert(role.id.as_str()) {
            errors.push(ValidationError::DuplicateRoleId(role.id.clone()));
        }

        for permission in role.permissions.iter().filter(|p| !p.starts_with('/')) {
            errors.push(ValidationError::RelativePermission {
                role: role.id.clone(),
                permission: permission.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RoleConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.access.roles = vec![
            RoleConfig {
                id: "editor".into(),
                name: String::new(),
                permissions: vec!["admin/article/list".into()],
            },
            RoleConfig {
                id: "editor".into(),
                name: String::new(),
                permissions: vec![],
            },
            RoleConfig {
                id: String::new(),
                name: String::new(),
                permissions: vec![],
            },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::RelativePermission {
                    role: "editor".into(),
                    permission: "admin/article/list".into(),
                },
                ValidationError::DuplicateRoleId("editor".into()),
                ValidationError::EmptyRoleId(2),
            ]
        );
    }
}
