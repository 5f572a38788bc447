//! Translation of sqlx errors into [`AppError`].
//!
//! Raw database text is kept as the error source for logging; the message
//! carried to clients is one of a few fixed sentences.

use parish_core::error::{AppError, ErrorKind};

/// SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE for `not_null_violation`.
pub const NOT_NULL_VIOLATION: &str = "23502";
/// SQLSTATE for `serialization_failure`.
pub const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE for `deadlock_detected`.
pub const DEADLOCK_DETECTED: &str = "40P01";

/// SQLSTATE of a database-reported error, if any.
pub fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

/// Whether `err` is a unique violation on the named constraint.
pub fn is_unique_violation_on(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() && db.constraint() == Some(constraint)
        }
        _ => false,
    }
}

/// Map a sqlx error to an [`AppError`], using `context` for unclassified
/// failures.
pub fn translate(context: &str, err: sqlx::Error) -> AppError {
    let (kind, message) = match sqlstate(&err).as_deref() {
        Some(UNIQUE_VIOLATION) => (
            ErrorKind::Conflict,
            "A record with the same unique value already exists",
        ),
        Some(FOREIGN_KEY_VIOLATION) => {
            (ErrorKind::Validation, "Referenced record does not exist")
        }
        Some(NOT_NULL_VIOLATION) => (ErrorKind::Validation, "A required field is missing"),
        _ => (ErrorKind::Database, context),
    };
    AppError::with_source(kind, message, err)
}

/// Like [`translate`], but a serialization failure or deadlock inside the
/// booking transaction becomes an availability conflict.
pub fn translate_booking(context: &str, err: sqlx::Error) -> AppError {
    match sqlstate(&err).as_deref() {
        Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED) => AppError::with_source(
            ErrorKind::Availability,
            "The selected time was just taken, please choose another",
            err,
        ),
        _ => translate(context, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_generic() {
        let err = translate("Failed to list slots", sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(err.message, "Failed to list slots");

        let err = translate_booking("Failed to book", sqlx::Error::PoolClosed);
        assert_eq!(err.kind, ErrorKind::Database);
    }

    #[test]
    fn test_sqlstate_absent_for_non_database_errors() {
        assert_eq!(sqlstate(&sqlx::Error::RowNotFound), None);
        assert!(!is_unique_violation_on(
            &sqlx::Error::RowNotFound,
            "reservations_confirmation_code_key"
        ));
    }
}
