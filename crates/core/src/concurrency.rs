//! Optimistic-concurrency rules shared by every versioned entity.
//!
//! Rows start at [`INITIAL_VERSION`]. An update is written as a single
//! statement conditioned on both the identifier and the version the caller
//! read, and bumps the version by one. When that statement matches nothing the
//! store is probed once more so a vanished row ([`CoreError::NotFound`]) can be
//! told apart from a lost race ([`CoreError::EditConflict`]). Nothing here
//! retries; that decision belongs to the caller.

use crate::error::CoreError;
use crate::types::{DbId, Version};

pub const INITIAL_VERSION: Version = 1;

/// The version a successful update will store.
pub fn next_version(current: Version) -> Version {
    current + 1
}

/// An entity whose updates are guarded by a version counter.
pub trait Versioned {
    /// Human-readable entity name used in error messages.
    const ENTITY: &'static str;

    fn id(&self) -> DbId;

    /// The version this in-memory snapshot was read at.
    fn version(&self) -> Version;
}

/// What the store holds for an identifier after a guarded update missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionProbe {
    Missing,
    Current(Version),
}

/// Classify a guarded update that matched no row.
pub fn resolve_miss(
    entity: &'static str,
    id: DbId,
    expected: Version,
    probe: VersionProbe,
) -> CoreError {
    match probe {
        VersionProbe::Missing => CoreError::NotFound { entity, id },
        VersionProbe::Current(current) => CoreError::EditConflict {
            entity,
            id,
            expected,
            current,
        },
    }
}
