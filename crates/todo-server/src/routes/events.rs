//! Server-Sent Events (SSE) subscriptions for store events.
//!
//! Endpoints:
//! - GET /events/todos - every created todo
//! - GET /events/notes?todo_id={id} - created notes, optionally for one todo
//!
//! # Example
//!
//! ```text
//! event: todo_added
//! data: {"type":"todo_added","todo":{"id":"...","name":"...","description":"","notes":[]}}
//!
//! event: note_added
//! data: {"type":"note_added","todo_id":"...","note":{"id":"...","text":"..."}}
//!
//! event: heartbeat
//! data: {"type":"heartbeat","subscribed_at":"2024-01-01T00:00:00Z"}
//! ```
//!
//! Each connection registers its own listener; closing the connection drops
//! the listener, which the store prunes on its next publish or subscribe.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    Router,
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use chrono::{DateTime, Utc};
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use todo_core::TodoId;
use todo_store::{StoreEvent, Subscription};

use crate::error::{ApiError, ApiResult};
use crate::extract::RequestContext;
use crate::state::AppState;

/// Heartbeat interval in seconds.
pub const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Heartbeat event data.
///
/// The keep-alive event is fixed per connection, so every heartbeat repeats
/// the time the connection subscribed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename = "heartbeat")]
pub struct HeartbeatEvent {
    /// When the connection subscribed.
    pub subscribed_at: DateTime<Utc>,
}

/// Query parameters for GET /events/notes.
#[derive(Debug, Deserialize)]
pub struct NoteEventsQuery {
    /// Only deliver notes added to this todo.
    pub todo_id: Option<String>,
}

/// Serialize a store event into an SSE event.
fn to_sse_event(event: &StoreEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(data) => Some(Event::default().event(event.name()).data(data)),
        Err(e) => {
            tracing::error!(error = %e, event = event.name(), "Failed to serialize event");
            None
        }
    }
}

fn heartbeat() -> KeepAlive {
    let data = serde_json::to_string(&HeartbeatEvent {
        subscribed_at: Utc::now(),
    })
    .unwrap_or_else(|_| r#"{"type":"heartbeat"}"#.to_string());

    KeepAlive::new()
        .interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS))
        .event(Event::default().event("heartbeat").data(data))
}

fn event_stream(sub: Subscription) -> impl Stream<Item = Result<Event, Infallible>> {
    sub.into_stream()
        .filter_map(|event| async move { to_sse_event(&event).map(Ok::<_, Infallible>) })
}

/// GET /events/todos - Subscribe to created todos.
async fn todo_events(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let sub = state.store().notifier().subscribe_todos();

    tracing::info!(
        listener_id = sub.id(),
        has_token = ctx.has_token(),
        "Client subscribed to todo events"
    );

    Sse::new(event_stream(sub)).keep_alive(heartbeat())
}

/// GET /events/notes - Subscribe to created notes.
///
/// # Response
///
/// - 200 OK: SSE stream (Content-Type: text/event-stream)
/// - 400 Bad Request: `todo_id` is not a valid id
/// - 404 Not Found: `todo_id` names no todo
async fn note_events(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<NoteEventsQuery>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let todo_id = match query.todo_id.as_deref() {
        Some(raw) => {
            let id = raw
                .parse::<TodoId>()
                .map_err(|_| ApiError::BadRequest(format!("invalid todo_id: {}", raw)))?;
            if state.store().get_todo(&id).is_none() {
                return Err(ApiError::NotFound(format!("Todo {} not found", id)));
            }
            Some(id)
        }
        None => None,
    };

    let sub = state.store().notifier().subscribe_notes(todo_id);

    tracing::info!(
        listener_id = sub.id(),
        todo_id = ?todo_id,
        has_token = ctx.has_token(),
        "Client subscribed to note events"
    );

    Ok(Sse::new(event_stream(sub)).keep_alive(heartbeat()))
}

/// Build SSE event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/todos", get(todo_events))
        .route("/events/notes", get(note_events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, StatusCode, header::CONTENT_TYPE};
    use todo_core::{NewNote, NewTodo};
    use todo_store::TodoStore;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    fn test_state() -> AppState {
        AppState::new(TodoStore::default(), ServerConfig::default())
    }

    #[test]
    fn test_heartbeat_interval() {
        assert_eq!(HEARTBEAT_INTERVAL_SECS, 30);
    }

    #[test]
    fn test_heartbeat_serialization() {
        let json = serde_json::to_value(HeartbeatEvent {
            subscribed_at: Utc::now(),
        })
        .unwrap();
        assert_eq!(json["type"], "heartbeat");
        assert!(json["subscribed_at"].is_string());
        assert!(json.get("timestamp").is_none());
    }

    #[tokio::test]
    async fn test_note_events_rejects_bad_filter() {
        let state = test_state();

        let response = routes()
            .with_state(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/events/notes?todo_id=nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = routes()
            .with_state(state)
            .oneshot(
                Request::builder()
                    .uri(format!("/events/notes?todo_id={}", TodoId::new()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_todo_events_stream_created_todo() {
        let state = test_state();

        let response = routes()
            .with_state(state.clone())
            .oneshot(Request::builder().uri("/events/todos").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/event-stream");
        assert_eq!(state.store().notifier().listener_count(), 1);

        let todo = state.store().add_todo(NewTodo::named("streamed")).unwrap();

        let frame = next_data_frame(response.into_body()).await;
        assert!(frame.contains("event: todo_added"));
        assert!(frame.contains(&todo.id.to_string()));
    }

    #[tokio::test]
    async fn test_note_events_only_for_filtered_todo() {
        let state = test_state();
        let watched = state.store().add_todo(NewTodo::named("watched")).unwrap();
        let other = state.store().add_todo(NewTodo::named("other")).unwrap();

        let response = routes()
            .with_state(state.clone())
            .oneshot(
                Request::builder()
                    .uri(format!("/events/notes?todo_id={}", watched.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        state.store().add_note(&other.id, NewNote::new("skip me")).unwrap();
        let note = state.store().add_note(&watched.id, NewNote::new("deliver me")).unwrap();

        let frame = next_data_frame(response.into_body()).await;
        assert!(frame.contains("event: note_added"));
        assert!(frame.contains(&note.id.to_string()));
        assert!(!frame.contains("skip me"));
    }

    async fn next_data_frame(body: Body) -> String {
        let mut stream = body.into_data_stream();
        let data = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        String::from_utf8(data.to_vec()).unwrap()
    }
}
