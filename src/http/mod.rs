//! Example application built on the routing subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, TraceLayer)
//!     → axum Router (routes registered through app.rs)
//!     → access control (route_layer, /admin settings)
//!     → handlers.rs, or the composed fallback chain on no match
//! ```

pub mod app;
pub mod handlers;
pub mod server;

pub use app::DemoApp;
pub use server::HttpServer;
