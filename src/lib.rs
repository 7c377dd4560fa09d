//! Route settings and group-scoped fallbacks for axum.
//!
//! Registering a route through a [`RouteGroup`] also records a queryable
//! [`RouteSetting`] (name, auth and ACL flags, extras). "No route" handlers
//! can be registered per group and are composed into one ordered fallback
//! chain on the underlying router.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;
pub mod security;

pub use error::RouteExtError;
pub use routing::{Engine, FallbackHandler, HttpMethod, Middleware, RouteGroup, RouteSetting};
