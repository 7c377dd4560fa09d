//! Error types for route registration.

use thiserror::Error;

/// Errors raised while registering routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteExtError {
    /// The method is not one of GET, POST, PUT, DELETE, HEAD, PATCH, OPTIONS.
    #[error("Route method is not supported: {0}")]
    UnsupportedMethod(String),
}
