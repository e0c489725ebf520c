use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    /// The results site answered with a non-2xx status.
    #[error("Failed to reach the results site (status: {status})")]
    Fetch { status: u16 },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The listing page parsed but no usable rows survived filtering. This
    /// is deliberately ambiguous between "athlete has no meets" and "the
    /// site's markup changed"; both degrade to the same message.
    #[error("No meets found. Double check the athlete ID.")]
    NoResults,

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::error::StorageError),

    #[error("Validation error: {0}")]
    Validation(String),
}
