//! Resource request entity model and DTOs.

use pso_core::allowed::{AllowedValues, ValueCategory};
use pso_core::concurrency::Versioned;
use pso_core::error::CoreError;
use pso_core::rules::{validate_future_start, validate_hours, validate_permitted, validate_skills};
use pso_core::types::{Date, DbId, Timestamp, Version};
use pso_core::validation::Validator;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::comment::Comment;
use super::patch;

/// Status given to requests created without one.
pub const DEFAULT_REQUEST_STATUS: &str = "Open";

/// A row from the `resource_requests` table.
///
/// `comments` is only populated by
/// [`ResourceRequestRepo::get_with_comments`](crate::repositories::ResourceRequestRepo::get_with_comments).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequest {
    pub id: DbId,
    pub opportunity_id: String,
    pub job_title: String,
    pub total_hours: f64,
    pub skills: Vec<String>,
    pub start_date: Date,
    pub hours_per_week: f64,
    pub status: String,
    pub version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl Versioned for ResourceRequest {
    const ENTITY: &'static str = "ResourceRequest";

    fn id(&self) -> DbId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }
}

/// DTO for creating a new resource request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub opportunity_id: String,
    pub job_title: String,
    pub total_hours: f64,
    pub skills: Vec<String>,
    pub start_date: Date,
    pub hours_per_week: f64,
    /// Defaults to `Open` if omitted.
    pub status: Option<String>,
}

impl CreateResourceRequest {
    /// `today` is the caller's current date; requests must start after it.
    pub fn validate(&self, allowed: &dyn AllowedValues, today: Date) -> Result<(), CoreError> {
        let mut v = Validator::new();
        v.check(
            !self.opportunity_id.is_empty(),
            "opportunityId",
            "must be provided",
        );
        validate_permitted(
            &mut v,
            allowed,
            ValueCategory::JobTitle,
            "jobTitle",
            &self.job_title,
        );
        validate_hours(&mut v, "totalHours", self.total_hours);
        validate_skills(&mut v, &self.skills);
        validate_future_start(&mut v, self.start_date, today);
        validate_hours(&mut v, "hoursPerWeek", self.hours_per_week);
        validate_permitted(
            &mut v,
            allowed,
            ValueCategory::RequestStatus,
            "status",
            self.status(),
        );
        v.finish()
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_REQUEST_STATUS)
    }
}

/// DTO for updating an existing resource request. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    pub opportunity_id: Option<String>,
    pub job_title: Option<String>,
    pub total_hours: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub start_date: Option<Date>,
    pub hours_per_week: Option<f64>,
    pub status: Option<String>,
}

impl UpdateResourceRequest {
    /// Validate only the fields this patch changes.
    ///
    /// A request whose start date has since passed can still be closed or
    /// re-skilled; moving the start date is what must land in the future.
    pub fn validate(&self, allowed: &dyn AllowedValues, today: Date) -> Result<(), CoreError> {
        let mut v = Validator::new();
        if let Some(opportunity_id) = &self.opportunity_id {
            v.check(!opportunity_id.is_empty(), "opportunityId", "must be provided");
        }
        if let Some(job_title) = &self.job_title {
            validate_permitted(&mut v, allowed, ValueCategory::JobTitle, "jobTitle", job_title);
        }
        if let Some(total_hours) = self.total_hours {
            validate_hours(&mut v, "totalHours", total_hours);
        }
        if let Some(skills) = &self.skills {
            validate_skills(&mut v, skills);
        }
        if let Some(start_date) = self.start_date {
            validate_future_start(&mut v, start_date, today);
        }
        if let Some(hours_per_week) = self.hours_per_week {
            validate_hours(&mut v, "hoursPerWeek", hours_per_week);
        }
        if let Some(status) = &self.status {
            validate_permitted(&mut v, allowed, ValueCategory::RequestStatus, "status", status);
        }
        v.finish()
    }

    pub fn apply_to(&self, request: &mut ResourceRequest) {
        patch(&mut request.opportunity_id, &self.opportunity_id);
        patch(&mut request.job_title, &self.job_title);
        patch(&mut request.total_hours, &self.total_hours);
        patch(&mut request.skills, &self.skills);
        patch(&mut request.start_date, &self.start_date);
        patch(&mut request.hours_per_week, &self.hours_per_week);
        patch(&mut request.status, &self.status);
    }
}
