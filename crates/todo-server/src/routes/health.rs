//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Number of todos currently held.
    pub todos: usize,
}

/// GET /health - Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        todos: state.store().len(),
    })
}

/// Build health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_store::TodoStore;

    use crate::config::ServerConfig;

    #[tokio::test]
    async fn test_health_check() {
        let state = AppState::new(TodoStore::default(), ServerConfig::default());
        let response = health_check(State(state)).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.todos, 0);
    }
}
