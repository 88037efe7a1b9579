//! Project entity model and DTOs.

use pso_core::allowed::{AllowedValues, ValueCategory};
use pso_core::concurrency::Versioned;
use pso_core::error::CoreError;
use pso_core::rules::{validate_permitted, validate_required_text};
use pso_core::types::{DbId, Timestamp, Version};
use pso_core::validation::Validator;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::patch;

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub opportunity_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub changepoint_id: String,
    pub revenue_type: String,
    pub name: String,
    pub customer: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub end_customer: String,
    pub project_manager: String,
    pub status: String,
    pub version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Versioned for Project {
    const ENTITY: &'static str = "Project";

    fn id(&self) -> DbId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }
}

impl Project {
    /// Validate every field of a patched project before it is written.
    pub fn validate(&self, allowed: &dyn AllowedValues) -> Result<(), CoreError> {
        let mut v = Validator::new();
        validate_fields(
            &mut v,
            allowed,
            &self.revenue_type,
            &self.name,
            &self.customer,
            &self.project_manager,
            &self.status,
        );
        v.finish()
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub opportunity_id: Option<String>,
    pub changepoint_id: Option<String>,
    pub revenue_type: String,
    pub name: String,
    pub customer: String,
    pub end_customer: Option<String>,
    pub project_manager: String,
    pub status: String,
}

impl CreateProject {
    pub fn validate(&self, allowed: &dyn AllowedValues) -> Result<(), CoreError> {
        let mut v = Validator::new();
        validate_fields(
            &mut v,
            allowed,
            &self.revenue_type,
            &self.name,
            &self.customer,
            &self.project_manager,
            &self.status,
        );
        v.finish()
    }
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub opportunity_id: Option<String>,
    pub changepoint_id: Option<String>,
    pub revenue_type: Option<String>,
    pub name: Option<String>,
    pub customer: Option<String>,
    pub end_customer: Option<String>,
    pub project_manager: Option<String>,
    pub status: Option<String>,
}

impl UpdateProject {
    /// Copy every supplied field onto `project`.
    pub fn apply_to(&self, project: &mut Project) {
        patch(&mut project.opportunity_id, &self.opportunity_id);
        patch(&mut project.changepoint_id, &self.changepoint_id);
        patch(&mut project.revenue_type, &self.revenue_type);
        patch(&mut project.name, &self.name);
        patch(&mut project.customer, &self.customer);
        patch(&mut project.end_customer, &self.end_customer);
        patch(&mut project.project_manager, &self.project_manager);
        patch(&mut project.status, &self.status);
    }
}

fn validate_fields(
    v: &mut Validator,
    allowed: &dyn AllowedValues,
    revenue_type: &str,
    name: &str,
    customer: &str,
    project_manager: &str,
    status: &str,
) {
    validate_permitted(
        v,
        allowed,
        ValueCategory::RevenueType,
        "revenueType",
        revenue_type,
    );
    validate_required_text(v, "name", name);
    validate_required_text(v, "customer", customer);
    validate_permitted(
        v,
        allowed,
        ValueCategory::ProjectManager,
        "projectManager",
        project_manager,
    );
    validate_permitted(v, allowed, ValueCategory::ProjectStatus, "status", status);
}
