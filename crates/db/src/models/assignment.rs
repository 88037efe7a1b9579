//! Resource assignment model. Assignments are written once and never edited.

use pso_core::error::CoreError;
use pso_core::rules::{validate_assignment_window, validate_hours_per_week};
use pso_core::types::{Date, DbId, Timestamp};
use pso_core::validation::Validator;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::resource_request::ResourceRequest;

/// A row from `resource_assignments`, joined with the assigned resource's name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAssignment {
    pub id: DbId,
    pub request_id: DbId,
    pub resource_id: DbId,
    /// Display name of the assigned resource.
    pub resource: String,
    pub start_date: Date,
    pub end_date: Date,
    pub hours_per_week: f64,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignment {
    pub request_id: DbId,
    pub resource_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
    pub hours_per_week: f64,
}

impl CreateAssignment {
    /// Check the assignment fits inside `request`'s start date and hour budget.
    pub fn validate(&self, request: &ResourceRequest) -> Result<(), CoreError> {
        let mut v = Validator::new();
        v.check(
            self.request_id == request.id,
            "requestId",
            "does not match the resource request",
        );
        v.check(self.resource_id > 0, "resourceId", "must be provided");
        validate_hours_per_week(&mut v, self.hours_per_week);
        validate_assignment_window(
            &mut v,
            request.start_date,
            request.total_hours,
            self.start_date,
            self.end_date,
            self.hours_per_week,
        );
        v.finish()
    }
}
