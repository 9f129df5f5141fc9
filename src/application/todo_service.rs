use crate::domain::error::StoreError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo};
use async_trait::async_trait;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: CreateTodo) -> Result<Todo, StoreError>;
    async fn get(&self, id: TodoId) -> Result<Todo, StoreError>;
    async fn list(&self) -> Vec<Todo>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Todo, StoreError>;
    async fn delete(&self, id: TodoId) -> Result<Todo, StoreError>;
    async fn reset(&self);
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, input: CreateTodo) -> Result<Todo, StoreError> { self.repo.create(input).await }
    async fn get(&self, id: TodoId) -> Result<Todo, StoreError> { self.repo.get(id).await }
    async fn list(&self) -> Vec<Todo> { self.repo.list().await }
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Todo, StoreError> { self.repo.update(id, input).await }
    async fn delete(&self, id: TodoId) -> Result<Todo, StoreError> { self.repo.delete(id).await }
    async fn reset(&self) { self.repo.reset().await }
}
