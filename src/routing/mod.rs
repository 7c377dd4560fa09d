//! Route metadata and group-scoped fallbacks on top of axum.
//!
//! # Data Flow
//! ```text
//! Registration (startup):
//!     Engine::group(path)
//!     → RouteGroup (idempotent per absolute path)
//!     → RouteGroup::get/post/... → axum Router::route
//!     → RouteSetting recorded under "METHOD /absolute/path"
//!     → RouteGroup::set(...) fills in the latest setting
//!
//! Request time:
//!     axum matches the route and inserts MatchedPath
//!     → RouteGroup::lookup_current(req)
//!     → route_key(method, "", matched path)
//!     → RouteSetting or None
//!
//! No route:
//!     FallbackChain (group handlers scoped by prefix, then default)
//! ```
//!
//! # Design Decisions
//! - axum owns matching and dispatch; this module only indexes and composes
//! - Methods are a closed enum at the registration boundary
//! - Lookups are exact on method and template, and case-sensitive
//! - Only the fallback guard lower-cases the request path

pub mod engine;
pub mod fallback;
pub mod group;
pub mod method;
pub mod middleware;
pub mod path;
pub mod setting;

pub use engine::{Engine, ROOT_PATH};
pub use fallback::{compose, FallbackChain, FallbackHandler, FallbackRequest};
pub use group::RouteGroup;
pub use method::HttpMethod;
pub use middleware::Middleware;
pub use path::{clean_path, join_paths, route_key};
pub use setting::{extra, RouteSetting};
