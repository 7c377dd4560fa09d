//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing (group creation, route registration, fallback install/dispatch)
//! http (TraceLayer request spans, request logging middleware)
//!     → tracing events
//!     → logging.rs (EnvFilter + fmt subscriber)
//!     → stderr
//! ```

pub mod logging;

pub use logging::init_logging;
