use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    error::StoreError,
    repository::TodoRepository,
    todo::{CreateTodo, Todo, TodoId, UpdateTodo},
};

/// In-memory todo store. Owns the item collection (kept in insertion order)
/// and the id counter; all validation and identity rules live here.
///
/// A single mutex guards both, held for the duration of each operation and
/// never across an await point, so id uniqueness and insertion order hold
/// under the multi-threaded runtime.
#[derive(Clone)]
pub struct InMemoryTodoRepository {
    inner: Arc<Mutex<StoreInner>>,
}

struct StoreInner {
    items: Vec<Todo>,
    next_id: u64,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(StoreInner { items: Vec::new(), next_id: 1 })) }
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self { Self::new() }
}

fn is_blank(title: &str) -> bool {
    title.trim().is_empty()
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, input: CreateTodo) -> Result<Todo, StoreError> {
        if is_blank(&input.title) {
            return Err(StoreError::InvalidArgument);
        }
        let mut inner = self.inner.lock().unwrap();
        let todo = Todo {
            id: TodoId(inner.next_id),
            title: input.title,
            completed: input.completed.unwrap_or(false),
            created_at: Utc::now(),
            updated_at: None,
        };
        inner.next_id += 1;
        inner.items.push(todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Todo, StoreError> {
        let inner = self.inner.lock().unwrap();
        inner.items.iter().find(|t| t.id == id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Vec<Todo> {
        self.inner.lock().unwrap().items.clone()
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Todo, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(todo) = inner.items.iter_mut().find(|t| t.id == id) else {
            return Err(StoreError::NotFound);
        };
        // Validate before touching anything so a rejected update is a no-op.
        if let Some(title) = &input.title {
            if is_blank(title) {
                return Err(StoreError::InvalidArgument);
            }
        }
        if let Some(title) = input.title {
            todo.title = title;
        }
        if let Some(completed) = input.completed {
            todo.completed = completed;
        }
        todo.updated_at = Some(Utc::now());
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<Todo, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let idx = inner.items.iter().position(|t| t.id == id).ok_or(StoreError::NotFound)?;
        Ok(inner.items.remove(idx))
    }

    async fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.items.clear();
        inner.next_id = 1;
    }
}
