//! Error types for Folio stores

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Email not found")]
    EmailNotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error("Only administrators can delete posts")]
    Forbidden,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used at the presentation boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field was missing or blank
    Validation,
    /// A unique key (username or email) is already taken
    Conflict,
    /// Credentials did not match
    Auth,
    /// The addressed record does not exist
    NotFound,
    /// The caller lacks the role the operation requires
    Forbidden,
    /// The storage backend failed
    Storage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::UsernameTaken | Error::EmailTaken => ErrorKind::Conflict,
            Error::InvalidCredentials => ErrorKind::Auth,
            Error::EmailNotFound | Error::PostNotFound => ErrorKind::NotFound,
            Error::Forbidden => ErrorKind::Forbidden,
            Error::Storage(_) | Error::Json(_) => ErrorKind::Storage,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Storage(e.to_string())
    }
}
