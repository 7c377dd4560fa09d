//! Role to route-template permissions.
//!
//! Deliberately minimal: a role either lists a route template or it does not.

use std::collections::{HashMap, HashSet};

use crate::config::RoleConfig;

#[derive(Debug, Clone)]
pub struct Role {
    pub id: String,
    pub name: String,
    permissions: HashSet<String>,
}

impl Role {
    pub fn permits(&self, route_template: &str) -> bool {
        self.permissions.contains(route_template)
    }
}

/// Access-control list keyed by role id.
#[derive(Debug, Clone, Default)]
pub struct Acl {
    roles: HashMap<String, Role>,
}

impl Acl {
    pub fn from_config(roles: &[RoleConfig]) -> Self {
        let roles = roles
            .iter()
            .map(|role| {
                let entry = Role {
                    id: role.id.clone(),
                    name: role.name.clone(),
                    permissions: role.permissions.iter().cloned().collect(),
                };
                (role.id.clone(), entry)
            })
            .collect();
        Self { roles }
    }

    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.get(id)
    }

    /// True when any of `role_ids` permits `route_template`. Unknown roles
    /// permit nothing.
    pub fn is_allowed(&self, role_ids: &[&str], route_template: &str) -> bool {
        role_ids
            .iter()
            .filter_map(|id| self.role(id))
            .any(|role| role.permits(route_template))
    }
}
