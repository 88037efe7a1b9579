//! Repository for the `resource_assignments` table.

use pso_core::error::CoreError;
use pso_core::types::DbId;

use crate::database::Database;
use crate::models::assignment::{CreateAssignment, ResourceAssignment};

const ENTITY: &str = "ResourceAssignment";

/// Assignment columns joined with the resource's display name. Expects the
/// assignment aliased as `a` and the resource as `r`.
const JOINED_COLUMNS: &str = "a.id, a.request_id, a.resource_id, r.name AS resource, \
     a.start_date, a.end_date, a.hours_per_week, a.created_at";

pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert an assignment and return it with the resource's name attached.
    ///
    /// Callers validate against the request first with
    /// [`CreateAssignment::validate`].
    pub async fn insert(
        db: &Database,
        input: &CreateAssignment,
    ) -> Result<ResourceAssignment, CoreError> {
        let deadline = db.deadline(ENTITY);
        let query = format!(
            "WITH a AS ( \
                INSERT INTO resource_assignments \
                    (request_id, resource_id, start_date, end_date, hours_per_week) \
                VALUES ($1, $2, $3, $4, $5) \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM a JOIN resources r ON r.id = a.resource_id"
        );
        deadline
            .run(
                sqlx::query_as::<_, ResourceAssignment>(&query)
                    .bind(input.request_id)
                    .bind(input.resource_id)
                    .bind(input.start_date)
                    .bind(input.end_date)
                    .bind(input.hours_per_week)
                    .fetch_one(deadline.pool()),
            )
            .await
    }

    /// Assignments staffing a request, earliest start first.
    pub async fn list_for_request(
        db: &Database,
        request_id: DbId,
    ) -> Result<Vec<ResourceAssignment>, CoreError> {
        let deadline = db.deadline(ENTITY);
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM resource_assignments a \
             JOIN resources r ON r.id = a.resource_id \
             WHERE a.request_id = $1 \
             ORDER BY a.start_date ASC, a.id ASC"
        );
        deadline
            .run(
                sqlx::query_as::<_, ResourceAssignment>(&query)
                    .bind(request_id)
                    .fetch_all(deadline.pool()),
            )
            .await
    }
}
