use thiserror::Error;

/// Failures while loading the registry or configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Where a resolution failure belongs when surfaced to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Client,
    Config,
    Internal,
}

/// Terminal failures of a single resolution request. None are retried.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no store name or address could be read from the input")]
    InvalidInput,

    #[error("merchant registry is empty or not loaded")]
    RegistryUnavailable,

    #[error("semantic search is not configured")]
    SemanticUnavailable,

    #[error("embedding service failed: {0}")]
    EmbeddingUnavailable(String),

    #[error("vector index failed: {0}")]
    VectorIndexUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::InvalidInput => ErrorKind::Client,
            ResolveError::RegistryUnavailable | ResolveError::SemanticUnavailable => ErrorKind::Config,
            ResolveError::EmbeddingUnavailable(_)
            | ResolveError::VectorIndexUnavailable(_)
            | ResolveError::Internal(_) => ErrorKind::Internal,
        }
    }
}
