use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("face id must be positive, got {0}")]
    InvalidFaceId(i64),
    #[error("top_k must be at least 1, got {0}")]
    InvalidTopK(i64),
    #[error("image {0} is empty")]
    EmptyImage(String),
}
