use thiserror::Error;

/// The only two failure modes of the store. Both are caller errors and map
/// to 4xx at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("todo not found")]
    NotFound,
    #[error("title must be non-empty")]
    InvalidArgument,
}
