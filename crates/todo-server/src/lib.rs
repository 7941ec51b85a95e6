//! todo-server: HTTP front end for the Todo service
//!
//! This crate provides:
//! - JSON endpoints for listing, reading and creating todos and notes
//! - Server-Sent Events (SSE) subscriptions for creation events
//! - Opaque request-context extraction (bearer token, never validated)
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - JSON error responses
//!
//! All state lives in one `TodoStore`, constructed in `main` and shared
//! through `AppState`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use todo_server::{config::ServerConfig, routes, state::AppState};
//!
//! let config = ServerConfig::from_env()?;
//! let state = AppState::from_config(config)?;
//! let app = routes::build_router(state);
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use extract::RequestContext;
pub use state::AppState;

// Re-export dependent crates
pub use todo_core;
pub use todo_store;
