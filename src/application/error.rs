//! Application-level errors (wraps domain and render errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::render::RenderError;

/// Application errors wrap lower layers and add input/config context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid input {source_name}: {message}")]
    Input {
        source_name: String,
        message: String,
    },

    #[error("no node titled '{0}'")]
    NodeNotFound(String),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
