//! Page / page-size / sort validation against a per-entity safelist.
//!
//! A [`FilterSortSpec`] can only be obtained through validation, which is
//! what makes it safe for the query builder to interpolate
//! [`FilterSortSpec::sort_column`] and [`FilterSortSpec::sort_direction`]
//! into an `ORDER BY` clause.

use std::fmt;

use serde::Deserialize;

use crate::error::CoreError;
use crate::validation::{permitted_value, Validator};

// ---------------------------------------------------------------------------
// Bounds and defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_PAGE: i64 = 1;
pub const MAX_PAGE: i64 = 10_000_000;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Sort direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

// ---------------------------------------------------------------------------
// Raw parameters
// ---------------------------------------------------------------------------

/// Paging and sort parameters exactly as they arrived (`?page=&pageSize=&sort=`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

// ---------------------------------------------------------------------------
// Validated spec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSortSpec {
    page: i64,
    page_size: i64,
    sort: String,
    safelist: &'static [&'static str],
}

impl FilterSortSpec {
    /// Validate already-typed values.
    pub fn new(
        page: i64,
        page_size: i64,
        sort: impl Into<String>,
        safelist: &'static [&'static str],
    ) -> Result<Self, CoreError> {
        let spec = Self {
            page,
            page_size,
            sort: sort.into(),
            safelist,
        };
        let mut v = Validator::new();
        spec.validate(&mut v);
        v.finish()?;
        Ok(spec)
    }

    /// Parse and validate raw strings, recording failures in `v`.
    ///
    /// Missing or empty values fall back to page 1, page size 20 and
    /// `default_sort`. Returns `None` exactly when an error was recorded for
    /// `page`, `pageSize` or `sort`.
    pub fn parse(
        params: &ListParams,
        default_sort: &str,
        safelist: &'static [&'static str],
        v: &mut Validator,
    ) -> Option<Self> {
        let page = parse_int(params.page.as_deref(), "page", DEFAULT_PAGE, v);
        let page_size = parse_int(
            params.page_size.as_deref(),
            "pageSize",
            DEFAULT_PAGE_SIZE,
            v,
        );
        let sort = match params.sort.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => default_sort,
        };

        let spec = Self {
            page,
            page_size,
            sort: sort.to_string(),
            safelist,
        };
        spec.validate(v);

        if ["page", "pageSize", "sort"].iter().any(|k| v.has_error(k)) {
            None
        } else {
            Some(spec)
        }
    }

    fn validate(&self, v: &mut Validator) {
        v.check(self.page > 0, "page", "must be greater than zero");
        v.check(self.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
        v.check(self.page_size > 0, "pageSize", "must be greater than zero");
        v.check(
            self.page_size <= MAX_PAGE_SIZE,
            "pageSize",
            "must be a maximum of 100",
        );
        v.check(
            permitted_value(&self.sort, self.safelist),
            "sort",
            "invalid sort value",
        );
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn sort(&self) -> &str {
        &self.sort
    }

    /// The safelisted sort key without its descending marker.
    pub fn sort_column(&self) -> &str {
        self.sort.strip_prefix('-').unwrap_or(&self.sort)
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Shared integer reader for query values.
pub(crate) fn parse_int(raw: Option<&str>, key: &str, default: i64, v: &mut Validator) -> i64 {
    match raw {
        None | Some("") => default,
        Some(s) => s.trim().parse().unwrap_or_else(|_| {
            v.add_error(key, "must be an integer value");
            default
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
