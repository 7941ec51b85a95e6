//! Todo and note routes.
//!
//! - GET /todos - List all todos in insertion order
//! - GET /todos/{id} - Get a single todo
//! - POST /todos - Create a todo
//! - POST /todos/{id}/notes - Append a note to a todo

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};

use todo_core::{NewNote, NewTodo, Note, Todo, TodoId};

use crate::error::{ApiError, ApiResult};
use crate::extract::RequestContext;
use crate::state::AppState;

/// Parse a path id. Anything that is not a valid id cannot name a todo, so it
/// is reported as not found rather than as a malformed request.
fn parse_todo_id(raw: &str) -> ApiResult<TodoId> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Todo {} not found", raw)))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// GET /todos - List all todos.
async fn list_todos(State(state): State<AppState>, ctx: RequestContext) -> Json<Vec<Todo>> {
    let todos = state.store().list_todos();
    tracing::debug!(count = todos.len(), has_token = ctx.has_token(), "Listed todos");
    Json(todos)
}

/// GET /todos/{id} - Get a todo with its notes.
///
/// # Response
///
/// - 200 OK: the todo
/// - 404 Not Found: no todo has this id
async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Todo>> {
    let todo_id = parse_todo_id(&id)?;
    state
        .store()
        .get_todo(&todo_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Todo {} not found", todo_id)))
}

/// POST /todos - Create a todo.
///
/// Body: `{ "name": "...", "description": "..." }` (description optional).
///
/// # Response
///
/// - 201 Created: the new todo
/// - 400 Bad Request: empty or missing name, or malformed JSON
async fn add_todo(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Result<Json<NewTodo>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let input = json_body(body)?;
    let todo = state.store().add_todo(input)?;

    tracing::info!(todo_id = %todo.id, has_token = ctx.has_token(), "Created todo");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// POST /todos/{id}/notes - Append a note.
///
/// Body: `{ "text": "..." }`.
///
/// # Response
///
/// - 201 Created: the new note
/// - 400 Bad Request: empty or missing text, or malformed JSON
/// - 404 Not Found: no todo has this id
async fn add_note(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    body: Result<Json<NewNote>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let todo_id = parse_todo_id(&id)?;
    let input = json_body(body)?;
    let note = state.store().add_note(&todo_id, input)?;

    tracing::info!(
        todo_id = %todo_id,
        note_id = %note.id,
        has_token = ctx.has_token(),
        "Created note"
    );

    Ok((StatusCode::CREATED, Json(note)))
}

/// Build todo routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(add_todo))
        .route("/todos/{id}", get(get_todo))
        .route("/todos/{id}/notes", post(add_note))
}
