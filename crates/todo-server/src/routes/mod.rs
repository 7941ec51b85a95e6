//! Route definitions for the HTTP API.

pub mod events;
pub mod health;
pub mod todos;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(todos::routes())
        .merge(events::routes())
        .with_state(state)
}
