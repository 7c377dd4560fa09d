//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Matched request:
//!     → access_control.rs (look up the route's settings)
//!     → requires_auth: user header present?        else 401
//!     → requires_acl: role permits the template?   else 403
//!     → handler
//! ```
//!
//! # Design Decisions
//! - Routes with no settings on the consulted group pass through
//! - Permissions name route templates, not concrete paths

pub mod access_control;
pub mod acl;

pub use access_control::{access_control_middleware, AccessControlState};
pub use acl::Acl;
