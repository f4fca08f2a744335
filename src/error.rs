use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from reading the catalog or config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not a valid JSON movie list.
    #[error("Catalog decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A section or row index outside the currently reported bounds.
    #[error("Index out of range: section {section}, row {index} (len {len})")]
    OutOfRange {
        section: usize,
        index: usize,
        len: usize,
    },
}
