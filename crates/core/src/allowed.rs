//! Permitted-value lists (job titles, managers, workgroups, statuses).
//!
//! Validation only ever talks to the [`AllowedValues`] trait, so the built-in
//! defaults and the snapshot loaded from the `lookup_values` table are
//! interchangeable.

use std::collections::HashMap;

/// A family of permitted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueCategory {
    RevenueType,
    ProjectManager,
    ProjectStatus,
    JobTitle,
    Manager,
    Workgroup,
    Clearance,
    RequestStatus,
}

impl ValueCategory {
    pub const ALL: [ValueCategory; 8] = [
        ValueCategory::RevenueType,
        ValueCategory::ProjectManager,
        ValueCategory::ProjectStatus,
        ValueCategory::JobTitle,
        ValueCategory::Manager,
        ValueCategory::Workgroup,
        ValueCategory::Clearance,
        ValueCategory::RequestStatus,
    ];

    /// Name stored in the `lookup_values.category` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueCategory::RevenueType => "revenue_type",
            ValueCategory::ProjectManager => "project_manager",
            ValueCategory::ProjectStatus => "project_status",
            ValueCategory::JobTitle => "job_title",
            ValueCategory::Manager => "manager",
            ValueCategory::Workgroup => "workgroup",
            ValueCategory::Clearance => "clearance",
            ValueCategory::RequestStatus => "request_status",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Source of permitted values for validation.
pub trait AllowedValues: Send + Sync {
    fn permitted(&self, category: ValueCategory) -> &[String];

    fn is_permitted(&self, category: ValueCategory, value: &str) -> bool {
        self.permitted(category).iter().any(|p| p == value)
    }
}

/// In-memory set of permitted values, keyed by category.
#[derive(Debug, Clone, Default)]
pub struct AllowedValueSet {
    values: HashMap<ValueCategory, Vec<String>>,
}

impl AllowedValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to a category. Duplicates are ignored.
    pub fn insert(&mut self, category: ValueCategory, value: impl Into<String>) {
        let value = value.into();
        let entry = self.values.entry(category).or_default();
        if !entry.contains(&value) {
            entry.push(value);
        }
    }

    pub fn with(mut self, category: ValueCategory, values: &[&str]) -> Self {
        for v in values {
            self.insert(category, *v);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(Vec::is_empty)
    }

    /// The lists the service shipped with before they moved into the
    /// `lookup_values` table.
    pub fn builtin() -> Self {
        Self::new()
            .with(ValueCategory::RevenueType, &["Fixed Fee", "T&M"])
            .with(ValueCategory::ProjectManager, &["Kim Slocum", "Nisha Halim"])
            .with(
                ValueCategory::ProjectStatus,
                &["Staged", "At Risk", "Work in progress", "Inactive", "Complete"],
            )
            .with(
                ValueCategory::JobTitle,
                &[
                    "Associate Project Manager I",
                    "Associate Consultant I",
                    "Associate Project Manager II",
                    "Associate Consultant II",
                    "Project Manager",
                    "Consultant",
                    "Senior Project Manager",
                    "Senior Consultant",
                    "Staff Consultant",
                    "Consulting Architect",
                    "Staff Consulting Architect",
                    "Manager - Professional Services - Delivery",
                    "Senior Manager - Professional Services - Delivery",
                    "Director - Professional Services - Delivery",
                ],
            )
            .with(
                ValueCategory::Manager,
                &[
                    "Caroline Dimitrovski",
                    "Gary Doyle",
                    "Lisa Ryan",
                    "Peter Stacey",
                    "Deborah Brathwaite",
                ],
            )
            .with(
                ValueCategory::Workgroup,
                &[
                    "APJ - Managers and Non-Billable",
                    "Architects - ANZ",
                    "PMO - ANZ",
                    "Retainer - ANZ",
                    "Server - Australia",
                ],
            )
            .with(
                ValueCategory::Clearance,
                &["None", "Baseline", "NV1", "NV2", "TSPV"],
            )
            .with(ValueCategory::RequestStatus, &["Open", "Closed"])
    }
}

impl AllowedValues for AllowedValueSet {
    fn permitted(&self, category: ValueCategory) -> &[String] {
        self.values.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}
