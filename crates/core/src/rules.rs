//! Field rules for project, resource, request, comment and assignment input.
//!
//! Each function records at most one message per field on the supplied
//! [`Validator`]. The composite per-entity checks live next to the models in
//! `pso-db`.

use chrono::{Datelike, Weekday};
use validator::ValidateEmail;

use crate::allowed::{AllowedValues, ValueCategory};
use crate::types::{Date, DbId};
use crate::validation::{unique, Validator};

/// Longest permitted value for free-text name fields, in bytes.
pub const MAX_TEXT_BYTES: usize = 256;

/// Longest permitted working week for a single assignment.
pub const MAX_HOURS_PER_WEEK: f64 = 40.0;

const WORKDAYS_PER_WEEK: f64 = 5.0;

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

pub fn validate_id(v: &mut Validator, id: DbId) {
    v.check(id != 0, "id", "must be provided");
    v.check(id > 0, "id", "cannot be a negative number");
}

pub fn validate_required_text(v: &mut Validator, key: &str, value: &str) {
    v.check(!value.is_empty(), key, "must be provided");
    v.check(
        value.len() <= MAX_TEXT_BYTES,
        key,
        "cannot be more than 256 bytes",
    );
}

/// Check `value` against the permitted list for `category`.
pub fn validate_permitted(
    v: &mut Validator,
    allowed: &dyn AllowedValues,
    category: ValueCategory,
    key: &str,
    value: &str,
) {
    let message = match category {
        ValueCategory::RevenueType => "is not a recognised revenue type",
        ValueCategory::ProjectManager => "is not a Project Manager",
        ValueCategory::ProjectStatus | ValueCategory::RequestStatus => {
            "is not a recognised status"
        }
        ValueCategory::JobTitle | ValueCategory::Workgroup => "does not exist",
        ValueCategory::Manager => "is not a manager",
        ValueCategory::Clearance => "is not a recognised clearance level",
    };
    v.check(allowed.is_permitted(category, value), key, message);
}

pub fn validate_distinct(v: &mut Validator, key: &str, values: &[String]) {
    v.check(unique(values), key, "cannot contain duplicate values");
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

pub fn validate_email(v: &mut Validator, email: &str) {
    v.check(!email.is_empty(), "email", "must be provided");
    v.check(email.validate_email(), "email", "must be a valid email address");
}

// ---------------------------------------------------------------------------
// Resource requests
// ---------------------------------------------------------------------------

pub fn validate_skills(v: &mut Validator, skills: &[String]) {
    v.check(!skills.is_empty(), "skills", "at least one skill is required");
    validate_distinct(v, "skills", skills);
}

/// A request must start strictly after `today`.
pub fn validate_future_start(v: &mut Validator, start_date: Date, today: Date) {
    v.check(
        start_date > today,
        "startDate",
        "cannot be today or in the past",
    );
}

pub fn validate_hours(v: &mut Validator, key: &str, hours: f64) {
    v.check(hours.is_finite() && hours > 0.0, key, "must be greater than zero");
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

pub fn validate_comment(v: &mut Validator, comment: &str) {
    v.check(!comment.trim().is_empty(), "comment", "must be provided");
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

pub fn validate_hours_per_week(v: &mut Validator, hours_per_week: f64) {
    validate_hours(v, "hoursPerWeek", hours_per_week);
    v.check(
        hours_per_week <= MAX_HOURS_PER_WEEK,
        "hoursPerWeek",
        "must be no more than 40",
    );
}

/// Check an assignment window against the request it staffs.
///
/// The assignment may not start before the request does, must end after it
/// starts, and may not book more hours than the request budgets.
pub fn validate_assignment_window(
    v: &mut Validator,
    request_start: Date,
    budget_hours: f64,
    start_date: Date,
    end_date: Date,
    hours_per_week: f64,
) {
    v.check(
        start_date >= request_start,
        "startDate",
        "cannot be before the request start date",
    );
    v.check(end_date > start_date, "endDate", "must be after startDate");
    if end_date > start_date {
        let booked = booked_hours(start_date, end_date, hours_per_week);
        v.check(
            booked <= budget_hours,
            "endDate",
            "is beyond the budgeted hours",
        );
    }
}

/// Hours booked by working `hours_per_week` across `[start, end)`.
pub fn booked_hours(start: Date, end: Date, hours_per_week: f64) -> f64 {
    workdays(start, end) as f64 * hours_per_week / WORKDAYS_PER_WEEK
}

/// Number of Monday-to-Friday days in `[start, end)`.
///
/// Computed from whole weeks plus the leftover days, so the cost does not
/// grow with the length of the range.
pub fn workdays(start: Date, end: Date) -> i64 {
    let days = (end - start).num_days();
    if days <= 0 {
        return 0;
    }
    let first = i64::from(start.weekday().num_days_from_monday());
    let saturday = i64::from(Weekday::Sat.num_days_from_monday());
    let leftover = (0..days % 7)
        .filter(|offset| (first + offset) % 7 < saturday)
        .count() as i64;
    days / 7 * 5 + leftover
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
