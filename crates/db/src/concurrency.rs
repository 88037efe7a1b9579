//! Store side of the version-guarded update protocol.

use pso_core::concurrency::{resolve_miss, VersionProbe, Versioned};
use pso_core::error::CoreError;
use pso_core::types::{DbId, Version};

use crate::database::Deadline;

/// Read the stored version for `id`, if the row still exists.
pub async fn probe_version(
    deadline: &Deadline<'_>,
    table: &'static str,
    id: DbId,
) -> Result<VersionProbe, CoreError> {
    let query = format!("SELECT version FROM {table} WHERE id = $1");
    let row: Option<(Version,)> = deadline
        .run(sqlx::query_as(&query).bind(id).fetch_optional(deadline.pool()))
        .await?;
    Ok(row.map_or(VersionProbe::Missing, |(version,)| {
        VersionProbe::Current(version)
    }))
}

/// Turn the outcome of a guarded `UPDATE ... RETURNING` into the caller's
/// result.
///
/// `updated` is the row the statement returned. When it is `None` the store
/// is probed once, under the same deadline, to report either
/// [`CoreError::NotFound`] or [`CoreError::EditConflict`].
pub async fn finish_update<T: Versioned>(
    deadline: &Deadline<'_>,
    table: &'static str,
    snapshot: &T,
    updated: Option<T>,
) -> Result<T, CoreError> {
    if let Some(row) = updated {
        tracing::debug!(
            entity = T::ENTITY,
            id = row.id(),
            version = row.version(),
            "Record updated"
        );
        return Ok(row);
    }

    let probe = probe_version(deadline, table, snapshot.id()).await?;
    let err = resolve_miss(T::ENTITY, snapshot.id(), snapshot.version(), probe);
    if let CoreError::EditConflict {
        id,
        expected,
        current,
        ..
    } = &err
    {
        tracing::warn!(entity = T::ENTITY, id, expected, current, "Edit conflict");
    }
    Err(err)
}
