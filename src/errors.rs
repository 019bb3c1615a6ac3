use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the I/O edges. Resolving and rendering never fail.
#[derive(Debug, Error)]
pub enum NavError {
    // Reading or writing a page or menu file
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Menu file that does not describe a valid menu
    #[error("invalid menu: {0}")]
    Menu(String),

    // Placeholder id that is not a usable selector, or a failed rewrite
    #[error("html rewrite error: {0}")]
    Html(String),

    // Serializing a report for output
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    // Directory traversal during a site build
    #[error("site walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl NavError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NavError::Io {
            path: path.into(),
            source,
        }
    }
}

// Type alias for results that use `NavError` as the error type
pub type Result<T> = std::result::Result<T, NavError>;
