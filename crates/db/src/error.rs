//! Mapping from `sqlx` failures to [`CoreError`].
//!
//! No raw `sqlx::Error` leaves this crate. Repositories read single rows with
//! `fetch_optional` and report absence themselves, so `RowNotFound` arriving
//! here means something unexpected happened and is treated as internal.

use pso_core::error::CoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify a storage error raised while working on `entity`.
///
/// Every failure maps to [`CoreError::Internal`]. Constraint names stay in
/// the `Display` detail and the log event; callers only ever see the
/// sanitized public message.
pub fn classify(entity: &'static str, err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            tracing::warn!(entity, constraint, "Unique constraint rejected write");
            return CoreError::Internal(format!(
                "{entity} violates unique constraint: {constraint}"
            ));
        }
    }

    tracing::error!(entity, error = %err, "Database error");
    CoreError::Internal(format!("{entity} storage failure: {err}"))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn row_not_found_is_internal() {
        assert_matches!(
            classify("Project", sqlx::Error::RowNotFound),
            CoreError::Internal(_)
        );
    }

    #[test]
    fn pool_exhaustion_is_internal_and_sanitized() {
        let err = classify("Resource", sqlx::Error::PoolTimedOut);
        assert!(err.to_string().contains("Resource"));
        assert_eq!(
            err.public_message(),
            pso_core::error::INTERNAL_ERROR_MESSAGE
        );
    }
}
