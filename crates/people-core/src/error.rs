//! Error types for the people & notes service.

use thiserror::Error;

/// Result type alias using the service's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for people & notes operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// Person not found
    #[error("Person with Id: {0} not found")]
    PersonNotFound(i64),

    /// Note not found under the given person
    #[error("Note {note_id} for Person {person_id} not found")]
    NoteNotFound { person_id: i64, note_id: i64 },

    /// A person with the same first and last name already exists
    #[error("Person {fname} {lname} already exists")]
    PersonExists { fname: String, lname: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors that mean "the addressed resource does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PersonNotFound(_) | Error::NoteNotFound { .. })
    }
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Error::Migration(e.to_string())
    }
}
