//! Error types for bookshelf.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("a book titled {0:?} already exists")]
    DuplicateTitle(String),

    #[error("rating should be between 0 and 100, got {0}")]
    RatingOutOfRange(f64),

    #[error("book not found: {0}")]
    NotFound(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Short, stable name of the error kind. Used as a metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::DuplicateTitle(_) => "duplicate_title",
            Error::RatingOutOfRange(_) => "rating_out_of_range",
            Error::NotFound(_) => "not_found",
            Error::MethodNotAllowed => "method_not_allowed",
            Error::Config(_) => "config",
            Error::Database(_) => "database",
            Error::Migrate(_) => "migrate",
            Error::Render(_) => "render",
            Error::Io(_) => "io",
            Error::Other(_) => "other",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
