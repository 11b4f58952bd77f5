//! Error types for noteful.

use thiserror::Error;

/// Result type alias using noteful's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for noteful operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// The SQLSTATE code of the underlying database error, if any.
    ///
    /// `23505` is a unique violation, `23503` a foreign key violation.
    pub fn sqlstate(&self) -> Option<String> {
        match self {
            Error::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().map(|code| code.into_owned())
            }
            _ => None,
        }
    }

    /// True when the database rejected a duplicate value on a unique column.
    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some("23505")
    }

    /// True when the database rejected a reference to a missing row.
    pub fn is_foreign_key_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some("23503")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("PORT is not a number".to_string());
        assert_eq!(err.to_string(), "Configuration error: PORT is not a number");
    }

    #[test]
    fn test_error_display_internal() {
        let err = Error::Internal("unexpected state".to_string());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
    }

    #[test]
    fn test_non_database_error_has_no_sqlstate() {
        let err = Error::Config("PORT".to_string());
        assert_eq!(err.sqlstate(), None);
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
    }

    #[test]
    fn test_row_not_found_has_no_sqlstate() {
        let err = Error::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.sqlstate(), None);
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
