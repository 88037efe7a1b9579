//! Permitted values loaded from the `lookup_values` table.

use pso_core::allowed::{AllowedValueSet, ValueCategory};
use pso_core::error::CoreError;

use crate::database::Database;

/// Snapshot every permitted value, in display order.
///
/// Rows whose category this build does not recognise are skipped with a
/// warning rather than failing startup.
pub async fn load_allowed_values(db: &Database) -> Result<AllowedValueSet, CoreError> {
    let deadline = db.deadline("LookupValue");
    let rows: Vec<(String, String)> = deadline
        .run(
            sqlx::query_as(
                "SELECT category, value FROM lookup_values ORDER BY category, sort_order, id",
            )
            .fetch_all(deadline.pool()),
        )
        .await?;

    let total = rows.len();
    let mut set = AllowedValueSet::new();
    for (category, value) in rows {
        match ValueCategory::parse(&category) {
            Some(category) => set.insert(category, value),
            None => tracing::warn!(category = %category, "Ignoring unknown lookup category"),
        }
    }

    tracing::info!(values = total, "Loaded allowed values");
    Ok(set)
}
