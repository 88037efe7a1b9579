//! Per-entity list filters and their sort safelists.
//!
//! An empty string or an empty list means "no constraint on this column".

use crate::params::QueryParams;
use crate::validation::Validator;

/// Filters accepted by one entity's list operation.
pub trait ListFilters: Sized {
    /// Sort key used when the caller does not supply one.
    const DEFAULT_SORT: &'static str;

    /// Every sort key the list operation accepts, including `-` forms.
    const SORT_SAFELIST: &'static [&'static str];

    fn from_query(qs: &QueryParams, v: &mut Validator) -> Self;
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

pub const PROJECT_SORT_SAFELIST: &[&str] = &[
    "id",
    "opportunity_id",
    "customer",
    "end_customer",
    "project_manager",
    "-id",
    "-opportunity_id",
    "-customer",
    "-end_customer",
    "-project_manager",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilters {
    pub customer: String,
    pub end_customer: String,
    pub project_manager: String,
    pub status: String,
    pub revenue_type: String,
}

impl ListFilters for ProjectFilters {
    const DEFAULT_SORT: &'static str = "opportunity_id";
    const SORT_SAFELIST: &'static [&'static str] = PROJECT_SORT_SAFELIST;

    fn from_query(qs: &QueryParams, _v: &mut Validator) -> Self {
        Self {
            customer: qs.string("customer", ""),
            end_customer: qs.string("endCustomer", ""),
            project_manager: qs.string("projectManager", ""),
            status: qs.string("status", ""),
            revenue_type: qs.string("revenueType", ""),
        }
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

pub const RESOURCE_SORT_SAFELIST: &[&str] = &["id", "name", "-id", "-name"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFilters {
    pub name: String,
    /// Match any of these workgroups.
    pub workgroups: Vec<String>,
    pub clearance: String,
    /// Resource must hold every listed specialty.
    pub specialties: Vec<String>,
    /// Resource must hold every listed certification.
    pub certifications: Vec<String>,
    pub manager: String,
    pub active: bool,
}

impl Default for ResourceFilters {
    fn default() -> Self {
        Self {
            name: String::new(),
            workgroups: Vec::new(),
            clearance: String::new(),
            specialties: Vec::new(),
            certifications: Vec::new(),
            manager: String::new(),
            active: true,
        }
    }
}

impl ListFilters for ResourceFilters {
    const DEFAULT_SORT: &'static str = "id";
    const SORT_SAFELIST: &'static [&'static str] = RESOURCE_SORT_SAFELIST;

    fn from_query(qs: &QueryParams, v: &mut Validator) -> Self {
        Self {
            name: qs.string("name", ""),
            workgroups: qs.csv("workgroups"),
            clearance: qs.string("clearance", ""),
            specialties: qs.csv("specialties"),
            certifications: qs.csv("certifications"),
            manager: qs.string("manager", ""),
            active: qs.bool("active", true, v),
        }
    }
}

// ---------------------------------------------------------------------------
// Resource requests
// ---------------------------------------------------------------------------

pub const RESOURCE_REQUEST_SORT_SAFELIST: &[&str] = &[
    "id",
    "opportunity_id",
    "start_date",
    "status",
    "-id",
    "-opportunity_id",
    "-start_date",
    "-status",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceRequestFilters {
    pub opportunity_id: String,
    pub job_title: String,
    pub status: String,
    /// Match requests asking for at least one of these skills.
    pub skills: Vec<String>,
}

impl ListFilters for ResourceRequestFilters {
    const DEFAULT_SORT: &'static str = "id";
    const SORT_SAFELIST: &'static [&'static str] = RESOURCE_REQUEST_SORT_SAFELIST;

    fn from_query(qs: &QueryParams, _v: &mut Validator) -> Self {
        Self {
            opportunity_id: qs.string("opportunityId", ""),
            job_title: qs.string("jobTitle", ""),
            status: qs.string("status", ""),
            skills: qs.csv("skills"),
        }
    }
}
