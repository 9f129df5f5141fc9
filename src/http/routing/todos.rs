use axum::http::StatusCode;
use axum::{extract::{Path, State}, routing::get, Json, Router};
use serde::Deserialize;

use crate::application::todo_service::TodoService;
use crate::domain::error::StoreError;
use crate::domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route("/api/todos/:id", get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Json<Vec<Todo>> {
    Json(state.service.list().await)
}

async fn get_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.service.get(parse_id(&id)?).await.map_err(|_| ApiError::not_found())?;
    Ok(Json(todo))
}

#[derive(Deserialize)]
struct CreateBody {
    title: Option<String>,
    completed: Option<bool>,
}

async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateBody>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    // A missing title and a blank one get the same rejection.
    let Some(title) = payload.title else {
        return Err(ApiError::bad_request("Title is required"));
    };
    let todo = state
        .service
        .create(CreateTodo { title, completed: payload.completed })
        .await
        .map_err(|_| ApiError::bad_request("Title is required"))?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    let updated = state.service.update(parse_id(&id)?, payload).await.map_err(|e| match e {
        StoreError::NotFound => ApiError::not_found(),
        StoreError::InvalidArgument => ApiError::bad_request("Title cannot be empty"),
    })?;
    Ok(Json(updated))
}

async fn delete_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let deleted = state.service.delete(parse_id(&id)?).await.map_err(|_| ApiError::not_found())?;
    Ok(Json(deleted))
}

// A non-numeric or out-of-range id can never match a stored item, so it is
// reported as NotFound rather than a parse error.
fn parse_id(s: &str) -> Result<TodoId, ApiError> {
    s.parse::<u64>().map(TodoId).map_err(|_| ApiError::not_found())
}
