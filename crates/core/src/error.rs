use std::collections::BTreeMap;

use crate::types::{DbId, Version};

/// Field-keyed validation messages. Only the first message per field is kept.
pub type FieldErrors = BTreeMap<String, String>;

/// Message surfaced to callers in place of internal error details.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process the request";

/// Message surfaced to callers when an update lost a race with another writer.
pub const EDIT_CONFLICT_MESSAGE: &str =
    "unable to update the record due to an edit conflict, please try again";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {}", summarize(.0))]
    Validation(FieldErrors),

    #[error("Edit conflict: {entity} {id} expected version {expected}, found {current}")]
    EditConflict {
        entity: &'static str,
        id: DbId,
        expected: Version,
        current: Version,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a validation error carrying a single field message.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), message.into());
        CoreError::Validation(errors)
    }

    /// Field messages for a validation error, `None` for every other kind.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            CoreError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Only edit conflicts are safe to retry, and only after re-fetching.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::EditConflict { .. })
    }

    /// The message a caller outside the service may see.
    ///
    /// Internal errors collapse to [`INTERNAL_ERROR_MESSAGE`]; their detail
    /// stays in the `Display` output for server-side diagnostics only.
    pub fn public_message(&self) -> String {
        match self {
            CoreError::NotFound { entity, id } => format!("{entity} with id {id} not found"),
            CoreError::Validation(errors) => summarize(errors),
            CoreError::EditConflict { .. } => EDIT_CONFLICT_MESSAGE.to_string(),
            CoreError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field} {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_message_is_sanitized() {
        let err = CoreError::Internal("connection refused to 10.0.0.5:5432".into());
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
        assert!(err.to_string().contains("10.0.0.5"));
    }

    #[test]
    fn validation_message_lists_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.insert("sort".into(), "invalid sort value".into());
        errors.insert("page".into(), "must be greater than zero".into());
        let err = CoreError::Validation(errors);
        assert_eq!(
            err.public_message(),
            "page must be greater than zero; sort invalid sort value"
        );
    }

    #[test]
    fn only_edit_conflict_is_retryable() {
        let conflict = CoreError::EditConflict {
            entity: "Project",
            id: 7,
            expected: 3,
            current: 4,
        };
        assert!(conflict.is_retryable());
        assert_eq!(conflict.public_message(), EDIT_CONFLICT_MESSAGE);
        assert!(!CoreError::NotFound { entity: "Project", id: 7 }.is_retryable());
        assert!(!CoreError::validation("name", "must be provided").is_retryable());
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Resource",
            id: 42,
        };
        assert_eq!(err.public_message(), "Resource with id 42 not found");
        assert!(err.field_errors().is_none());
    }
}
