//! Per-route metadata.

use std::collections::HashMap;

use serde::Serialize;

use crate::routing::method::HttpMethod;

/// Metadata attached to one registered `(method, path)` pair.
///
/// Created when the route is registered. Only `name`, `requires_auth`,
/// `requires_acl` and `extra` change afterwards, through
/// [`RouteGroup::set`](crate::routing::RouteGroup::set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSetting {
    /// Registration order within the owning group, starting at 1.
    pub order: usize,

    pub method: HttpMethod,

    /// Path as registered on the owning group.
    pub path: String,

    /// Absolute path the route is indexed and mounted under.
    pub full_path: String,

    /// Free-text label describing the route.
    pub name: String,

    /// Does the route require an authenticated caller?
    pub requires_auth: bool,

    /// Does the route require an access-control check?
    pub requires_acl: bool,

    /// Application-defined values, opaque to this crate.
    pub extra: HashMap<String, String>,
}

impl RouteSetting {
    pub(crate) fn new(
        order: usize,
        method: HttpMethod,
        path: impl Into<String>,
        full_path: impl Into<String>,
    ) -> Self {
        Self {
            order,
            method,
            path: path.into(),
            full_path: full_path.into(),
            name: String::new(),
            requires_auth: false,
            requires_acl: false,
            extra: HashMap::new(),
        }
    }

    /// Look up one value in `extra`.
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

/// Build an `extra` map from string pairs.
pub fn extra<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
