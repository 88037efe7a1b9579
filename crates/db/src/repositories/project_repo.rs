//! Repository for the `projects` table.

use pso_core::concurrency::Versioned;
use pso_core::error::CoreError;
use pso_core::filters::FilterSortSpec;
use pso_core::listing::ProjectFilters;
use pso_core::pagination::{calculate_metadata, PageMetadata};
use pso_core::types::DbId;

use crate::concurrency::finish_update;
use crate::database::Database;
use crate::models::project::{CreateProject, Project};
use crate::query::{Condition, ListQuery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, opportunity_id, changepoint_id, revenue_type, name, customer, \
     end_customer, project_manager, status, version, created_at, updated_at";

const TABLE: &str = "projects";

/// Provides versioned CRUD and filtered listing for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row at version 1.
    pub async fn insert(db: &Database, input: &CreateProject) -> Result<Project, CoreError> {
        let deadline = db.deadline(Project::ENTITY);
        let query = format!(
            "INSERT INTO projects \
                (opportunity_id, changepoint_id, revenue_type, name, customer, \
                 end_customer, project_manager, status) \
             VALUES (COALESCE($1, ''), COALESCE($2, ''), $3, $4, $5, COALESCE($6, ''), $7, $8) \
             RETURNING {COLUMNS}"
        );
        deadline
            .run(
                sqlx::query_as::<_, Project>(&query)
                    .bind(&input.opportunity_id)
                    .bind(&input.changepoint_id)
                    .bind(&input.revenue_type)
                    .bind(&input.name)
                    .bind(&input.customer)
                    .bind(&input.end_customer)
                    .bind(&input.project_manager)
                    .bind(&input.status)
                    .fetch_one(deadline.pool()),
            )
            .await
    }

    /// Find a project by ID. Non-positive IDs are rejected without a query.
    pub async fn get(db: &Database, id: DbId) -> Result<Project, CoreError> {
        let not_found = CoreError::NotFound {
            entity: Project::ENTITY,
            id,
        };
        if id < 1 {
            return Err(not_found);
        }

        let deadline = db.deadline(Project::ENTITY);
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        deadline
            .run(
                sqlx::query_as::<_, Project>(&query)
                    .bind(id)
                    .fetch_optional(deadline.pool()),
            )
            .await?
            .ok_or(not_found)
    }

    /// Write every field of `project` if the stored version still matches.
    ///
    /// Returns the stored row with its version advanced by one.
    pub async fn update(db: &Database, project: &Project) -> Result<Project, CoreError> {
        let deadline = db.deadline(Project::ENTITY);
        let query = format!(
            "UPDATE projects SET \
                opportunity_id = $3, \
                changepoint_id = $4, \
                revenue_type = $5, \
                name = $6, \
                customer = $7, \
                end_customer = $8, \
                project_manager = $9, \
                status = $10, \
                version = version + 1, \
                updated_at = NOW() \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        let updated = deadline
            .run(
                sqlx::query_as::<_, Project>(&query)
                    .bind(project.id)
                    .bind(project.version)
                    .bind(&project.opportunity_id)
                    .bind(&project.changepoint_id)
                    .bind(&project.revenue_type)
                    .bind(&project.name)
                    .bind(&project.customer)
                    .bind(&project.end_customer)
                    .bind(&project.project_manager)
                    .bind(&project.status)
                    .fetch_optional(deadline.pool()),
            )
            .await?;
        finish_update(&deadline, TABLE, project, updated).await
    }

    /// List projects matching `filters`, one page at a time.
    pub async fn get_all(
        db: &Database,
        filters: &ProjectFilters,
        spec: &FilterSortSpec,
    ) -> Result<(Vec<Project>, PageMetadata), CoreError> {
        let deadline = db.deadline(Project::ENTITY);
        let (projects, total) = ListQuery::new(TABLE, COLUMNS, "id", spec)
            .filter(Condition::Equals("customer", filters.customer.clone()))
            .filter(Condition::Equals("end_customer", filters.end_customer.clone()))
            .filter(Condition::Equals(
                "project_manager",
                filters.project_manager.clone(),
            ))
            .filter(Condition::Equals("status", filters.status.clone()))
            .filter(Condition::Equals("revenue_type", filters.revenue_type.clone()))
            .fetch_page::<Project>(&deadline)
            .await?;
        Ok((
            projects,
            calculate_metadata(total, spec.page(), spec.page_size()),
        ))
    }
}
