use async_trait::async_trait;

use super::error::StoreError;
use super::todo::{CreateTodo, Todo, TodoId, UpdateTodo};

#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn create(&self, input: CreateTodo) -> Result<Todo, StoreError>;
    async fn get(&self, id: TodoId) -> Result<Todo, StoreError>;
    async fn list(&self) -> Vec<Todo>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Todo, StoreError>;
    async fn delete(&self, id: TodoId) -> Result<Todo, StoreError>;
    /// Teardown hook: clears all items and resets the id counter to 1.
    async fn reset(&self);
}
