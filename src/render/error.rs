//! Rendering errors (wraps domain errors)

use std::io;

use thiserror::Error;

use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("failed to write line: {0}")]
    Write(#[from] io::Error),
}

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;
