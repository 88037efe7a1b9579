//! Field-keyed validation accumulator.
//!
//! A [`Validator`] collects messages keyed by request field name. The first
//! message recorded for a field wins, so callers can chain checks from most
//! to least specific. Any accumulated error blocks the operation via
//! [`Validator::finish`].

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{CoreError, FieldErrors};

#[derive(Debug, Clone, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error(&self, key: &str) -> bool {
        self.errors.contains_key(key)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Record `message` for `key` unless the field already has one.
    pub fn add_error(&mut self, key: &str, message: &str) {
        self.errors
            .entry(key.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record `message` for `key` when `ok` is false.
    pub fn check(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_error(key, message);
        }
    }

    /// Convert the accumulated state into a result.
    pub fn finish(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }
}

/// Whether `value` is one of `permitted`.
pub fn permitted_value<T: AsRef<str>>(value: &str, permitted: &[T]) -> bool {
    permitted.iter().any(|p| p.as_ref() == value)
}

/// Whether every element of `values` is distinct.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}
