//! Repository for the `resources` table.

use pso_core::concurrency::Versioned;
use pso_core::error::CoreError;
use pso_core::filters::FilterSortSpec;
use pso_core::listing::ResourceFilters;
use pso_core::pagination::{calculate_metadata, PageMetadata};
use pso_core::types::DbId;

use crate::concurrency::finish_update;
use crate::database::Database;
use crate::models::resource::{CreateResource, Resource};
use crate::query::{Condition, ListQuery};

const COLUMNS: &str = "id, name, email, job_title, manager, workgroup, clearance, \
     specialties, certifications, active, version, created_at, updated_at";

const TABLE: &str = "resources";

/// Provides versioned CRUD and filtered listing for resources.
pub struct ResourceRepo;

impl ResourceRepo {
    /// Insert a new resource under the caller's employee id.
    ///
    /// Reusing an employee id fails as [`CoreError::Internal`].
    pub async fn insert(db: &Database, input: &CreateResource) -> Result<Resource, CoreError> {
        let deadline = db.deadline(Resource::ENTITY);
        let query = format!(
            "INSERT INTO resources \
                (id, name, email, job_title, manager, workgroup, clearance, \
                 specialties, certifications, active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, true)) \
             RETURNING {COLUMNS}"
        );
        deadline
            .run(
                sqlx::query_as::<_, Resource>(&query)
                    .bind(input.id)
                    .bind(&input.name)
                    .bind(&input.email)
                    .bind(&input.job_title)
                    .bind(&input.manager)
                    .bind(&input.workgroup)
                    .bind(&input.clearance)
                    .bind(&input.specialties)
                    .bind(&input.certifications)
                    .bind(input.active)
                    .fetch_one(deadline.pool()),
            )
            .await
    }

    /// Find a resource by employee id. Non-positive ids are rejected without a query.
    pub async fn get(db: &Database, id: DbId) -> Result<Resource, CoreError> {
        let not_found = CoreError::NotFound {
            entity: Resource::ENTITY,
            id,
        };
        if id < 1 {
            return Err(not_found);
        }

        let deadline = db.deadline(Resource::ENTITY);
        let query = format!("SELECT {COLUMNS} FROM resources WHERE id = $1");
        deadline
            .run(
                sqlx::query_as::<_, Resource>(&query)
                    .bind(id)
                    .fetch_optional(deadline.pool()),
            )
            .await?
            .ok_or(not_found)
    }

    /// Write every mutable field of `resource` if the stored version still matches.
    pub async fn update(db: &Database, resource: &Resource) -> Result<Resource, CoreError> {
        let deadline = db.deadline(Resource::ENTITY);
        let query = format!(
            "UPDATE resources SET \
                name = $3, \
                email = $4, \
                job_title = $5, \
                manager = $6, \
                workgroup = $7, \
                clearance = $8, \
                specialties = $9, \
                certifications = $10, \
                active = $11, \
                version = version + 1, \
                updated_at = NOW() \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        let updated = deadline
            .run(
                sqlx::query_as::<_, Resource>(&query)
                    .bind(resource.id)
                    .bind(resource.version)
                    .bind(&resource.name)
                    .bind(&resource.email)
                    .bind(&resource.job_title)
                    .bind(&resource.manager)
                    .bind(&resource.workgroup)
                    .bind(&resource.clearance)
                    .bind(&resource.specialties)
                    .bind(&resource.certifications)
                    .bind(resource.active)
                    .fetch_optional(deadline.pool()),
            )
            .await?;
        finish_update(&deadline, TABLE, resource, updated).await
    }

    /// List resources matching `filters`, one page at a time.
    ///
    /// `workgroups` matches any listed workgroup; `specialties` and
    /// `certifications` require every listed value.
    pub async fn get_all(
        db: &Database,
        filters: &ResourceFilters,
        spec: &FilterSortSpec,
    ) -> Result<(Vec<Resource>, PageMetadata), CoreError> {
        let deadline = db.deadline(Resource::ENTITY);
        let (resources, total) = ListQuery::new(TABLE, COLUMNS, "id", spec)
            .filter(Condition::Equals("name", filters.name.clone()))
            .filter(Condition::AnyOf("workgroup", filters.workgroups.clone()))
            .filter(Condition::Equals("clearance", filters.clearance.clone()))
            .filter(Condition::ContainsAll(
                "specialties",
                filters.specialties.clone(),
            ))
            .filter(Condition::ContainsAll(
                "certifications",
                filters.certifications.clone(),
            ))
            .filter(Condition::Equals("manager", filters.manager.clone()))
            .filter(Condition::Is("active", filters.active))
            .fetch_page::<Resource>(&deadline)
            .await?;
        Ok((
            resources,
            calculate_metadata(total, spec.page(), spec.page_size()),
        ))
    }
}
