//! Resource (employee) entity model and DTOs.
//!
//! Resources are keyed by the employee id assigned by HR, not by a
//! database sequence.

use pso_core::allowed::{AllowedValues, ValueCategory};
use pso_core::concurrency::Versioned;
use pso_core::error::CoreError;
use pso_core::rules::{
    validate_distinct, validate_email, validate_id, validate_permitted, validate_required_text,
};
use pso_core::types::{DbId, Timestamp, Version};
use pso_core::validation::Validator;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::patch;

/// A row from the `resources` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub manager: String,
    pub workgroup: String,
    pub clearance: String,
    pub specialties: Vec<String>,
    pub certifications: Vec<String>,
    pub active: bool,
    pub version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Versioned for Resource {
    const ENTITY: &'static str = "Resource";

    fn id(&self) -> DbId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }
}

impl Resource {
    pub fn validate(&self, allowed: &dyn AllowedValues) -> Result<(), CoreError> {
        let mut v = Validator::new();
        validate_id(&mut v, self.id);
        validate_required_text(&mut v, "name", &self.name);
        validate_email(&mut v, &self.email);
        validate_lookups(
            &mut v,
            allowed,
            &self.job_title,
            &self.manager,
            &self.workgroup,
            &self.clearance,
        );
        validate_distinct(&mut v, "specialties", &self.specialties);
        validate_distinct(&mut v, "certifications", &self.certifications);
        v.finish()
    }
}

/// DTO for creating a new resource. `id` is the caller's employee id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResource {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub manager: String,
    pub workgroup: String,
    pub clearance: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

impl CreateResource {
    pub fn validate(&self, allowed: &dyn AllowedValues) -> Result<(), CoreError> {
        let mut v = Validator::new();
        validate_id(&mut v, self.id);
        validate_required_text(&mut v, "name", &self.name);
        validate_email(&mut v, &self.email);
        validate_lookups(
            &mut v,
            allowed,
            &self.job_title,
            &self.manager,
            &self.workgroup,
            &self.clearance,
        );
        validate_distinct(&mut v, "specialties", &self.specialties);
        validate_distinct(&mut v, "certifications", &self.certifications);
        v.finish()
    }
}

/// DTO for updating an existing resource. The employee id cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResource {
    pub name: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub manager: Option<String>,
    pub workgroup: Option<String>,
    pub clearance: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub active: Option<bool>,
}

impl UpdateResource {
    pub fn apply_to(&self, resource: &mut Resource) {
        patch(&mut resource.name, &self.name);
        patch(&mut resource.email, &self.email);
        patch(&mut resource.job_title, &self.job_title);
        patch(&mut resource.manager, &self.manager);
        patch(&mut resource.workgroup, &self.workgroup);
        patch(&mut resource.clearance, &self.clearance);
        patch(&mut resource.specialties, &self.specialties);
        patch(&mut resource.certifications, &self.certifications);
        patch(&mut resource.active, &self.active);
    }
}

fn validate_lookups(
    v: &mut Validator,
    allowed: &dyn AllowedValues,
    job_title: &str,
    manager: &str,
    workgroup: &str,
    clearance: &str,
) {
    validate_permitted(v, allowed, ValueCategory::JobTitle, "jobTitle", job_title);
    validate_permitted(v, allowed, ValueCategory::Manager, "manager", manager);
    validate_permitted(v, allowed, ValueCategory::Workgroup, "workgroup", workgroup);
    validate_permitted(v, allowed, ValueCategory::Clearance, "clearance", clearance);
}
