//! Repository for the `resource_requests` table.

use pso_core::concurrency::Versioned;
use pso_core::error::CoreError;
use pso_core::filters::FilterSortSpec;
use pso_core::listing::ResourceRequestFilters;
use pso_core::pagination::{calculate_metadata, PageMetadata};
use pso_core::types::DbId;

use crate::concurrency::finish_update;
use crate::database::{Database, Deadline};
use crate::models::resource_request::{CreateResourceRequest, ResourceRequest};
use crate::query::{Condition, ListQuery};
use crate::repositories::CommentRepo;

const COLUMNS: &str = "id, opportunity_id, job_title, total_hours, skills, start_date, \
     hours_per_week, status, version, created_at, updated_at";

const TABLE: &str = "resource_requests";

/// Provides versioned CRUD and filtered listing for resource requests.
pub struct ResourceRequestRepo;

impl ResourceRequestRepo {
    pub async fn insert(
        db: &Database,
        input: &CreateResourceRequest,
    ) -> Result<ResourceRequest, CoreError> {
        let deadline = db.deadline(ResourceRequest::ENTITY);
        let query = format!(
            "INSERT INTO resource_requests \
                (opportunity_id, job_title, total_hours, skills, start_date, \
                 hours_per_week, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        deadline
            .run(
                sqlx::query_as::<_, ResourceRequest>(&query)
                    .bind(&input.opportunity_id)
                    .bind(&input.job_title)
                    .bind(input.total_hours)
                    .bind(&input.skills)
                    .bind(input.start_date)
                    .bind(input.hours_per_week)
                    .bind(input.status())
                    .fetch_one(deadline.pool()),
            )
            .await
    }

    /// Find a request by ID, without its comments.
    pub async fn get(db: &Database, id: DbId) -> Result<ResourceRequest, CoreError> {
        Self::get_with(&db.deadline(ResourceRequest::ENTITY), id).await
    }

    /// Find a request by ID and attach its comments, oldest first.
    ///
    /// Both round-trips share one deadline.
    pub async fn get_with_comments(db: &Database, id: DbId) -> Result<ResourceRequest, CoreError> {
        let deadline = db.deadline(ResourceRequest::ENTITY);
        let mut request = Self::get_with(&deadline, id).await?;
        request.comments = CommentRepo::list_for_request_with(&deadline, id).await?;
        Ok(request)
    }

    pub(crate) async fn get_with(
        deadline: &Deadline<'_>,
        id: DbId,
    ) -> Result<ResourceRequest, CoreError> {
        let not_found = CoreError::NotFound {
            entity: ResourceRequest::ENTITY,
            id,
        };
        if id < 1 {
            return Err(not_found);
        }

        let query = format!("SELECT {COLUMNS} FROM resource_requests WHERE id = $1");
        deadline
            .run(
                sqlx::query_as::<_, ResourceRequest>(&query)
                    .bind(id)
                    .fetch_optional(deadline.pool()),
            )
            .await?
            .ok_or(not_found)
    }

    /// Write every field of `request` if the stored version still matches.
    ///
    /// Comments are stored separately and are not touched.
    pub async fn update(
        db: &Database,
        request: &ResourceRequest,
    ) -> Result<ResourceRequest, CoreError> {
        let deadline = db.deadline(ResourceRequest::ENTITY);
        let query = format!(
            "UPDATE resource_requests SET \
                opportunity_id = $3, \
                job_title = $4, \
                total_hours = $5, \
                skills = $6, \
                start_date = $7, \
                hours_per_week = $8, \
                status = $9, \
                version = version + 1, \
                updated_at = NOW() \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        let updated = deadline
            .run(
                sqlx::query_as::<_, ResourceRequest>(&query)
                    .bind(request.id)
                    .bind(request.version)
                    .bind(&request.opportunity_id)
                    .bind(&request.job_title)
                    .bind(request.total_hours)
                    .bind(&request.skills)
                    .bind(request.start_date)
                    .bind(request.hours_per_week)
                    .bind(&request.status)
                    .fetch_optional(deadline.pool()),
            )
            .await?;
        finish_update(&deadline, TABLE, request, updated).await
    }

    /// List requests matching `filters`, one page at a time.
    ///
    /// `skills` matches requests asking for at least one listed skill.
    pub async fn get_all(
        db: &Database,
        filters: &ResourceRequestFilters,
        spec: &FilterSortSpec,
    ) -> Result<(Vec<ResourceRequest>, PageMetadata), CoreError> {
        let deadline = db.deadline(ResourceRequest::ENTITY);
        let (requests, total) = ListQuery::new(TABLE, COLUMNS, "id", spec)
            .filter(Condition::Equals(
                "opportunity_id",
                filters.opportunity_id.clone(),
            ))
            .filter(Condition::Equals("job_title", filters.job_title.clone()))
            .filter(Condition::Equals("status", filters.status.clone()))
            .filter(Condition::Overlaps("skills", filters.skills.clone()))
            .fetch_page::<ResourceRequest>(&deadline)
            .await?;
        Ok((
            requests,
            calculate_metadata(total, spec.page(), spec.page_size()),
        ))
    }

    /// Every request raised against an opportunity, oldest first.
    pub async fn list_for_opportunity(
        db: &Database,
        opportunity_id: &str,
    ) -> Result<Vec<ResourceRequest>, CoreError> {
        let deadline = db.deadline(ResourceRequest::ENTITY);
        let query = format!(
            "SELECT {COLUMNS} FROM resource_requests WHERE opportunity_id = $1 ORDER BY id ASC"
        );
        deadline
            .run(
                sqlx::query_as::<_, ResourceRequest>(&query)
                    .bind(opportunity_id)
                    .fetch_all(deadline.pool()),
            )
            .await
    }
}
