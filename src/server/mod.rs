//! A small HTTP front end for headline analysis

/// Request handlers
pub mod handlers;

/// Router and server configuration
pub mod routes;

pub use routes::{create_router, AppState, ServerConfig};
