//! Readers over already-extracted query-string values.
//!
//! The transport layer hands over a flat `key -> value` map; these helpers
//! apply defaults and record parse failures on a shared [`Validator`] so a
//! single response can list every bad parameter at once.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CoreError;
use crate::filters::{parse_int, FilterSortSpec, ListParams};
use crate::listing::ListFilters;
use crate::validation::Validator;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|s| !s.is_empty())
    }

    /// The value for `key`, or `default` when missing or empty.
    pub fn string(&self, key: &str, default: &str) -> String {
        self.raw(key).unwrap_or(default).to_string()
    }

    /// Comma-separated values with surrounding whitespace and empty items removed.
    pub fn csv(&self, key: &str) -> Vec<String> {
        self.raw(key)
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Accepts the usual spellings: `1`, `t`, `T`, `true`, `TRUE`, `True`
    /// and their false counterparts.
    pub fn bool(&self, key: &str, default: bool, v: &mut Validator) -> bool {
        match self.raw(key) {
            None => default,
            Some("1" | "t" | "T" | "true" | "TRUE" | "True") => true,
            Some("0" | "f" | "F" | "false" | "FALSE" | "False") => false,
            Some(_) => {
                v.add_error(key, "must be 'true' or 'false'");
                default
            }
        }
    }

    /// Missing or empty values fall back to `default`.
    pub fn int(&self, key: &str, default: i64, v: &mut Validator) -> i64 {
        parse_int(self.raw(key), key, default, v)
    }

    pub fn list_params(&self) -> ListParams {
        ListParams {
            page: self.raw("page").map(String::from),
            page_size: self.raw("pageSize").map(String::from),
            sort: self.raw("sort").map(String::from),
        }
    }

    /// Parse entity filters and the page/sort spec in one pass.
    ///
    /// Every bad parameter is reported together in a single
    /// [`CoreError::Validation`].
    pub fn parse_list<F: ListFilters>(&self) -> Result<(F, FilterSortSpec), CoreError> {
        let mut v = Validator::new();
        let filters = F::from_query(self, &mut v);
        let spec = FilterSortSpec::parse(
            &self.list_params(),
            F::DEFAULT_SORT,
            F::SORT_SAFELIST,
            &mut v,
        );
        match spec {
            Some(spec) if v.is_valid() => Ok((filters, spec)),
            _ => Err(CoreError::Validation(v.errors().clone())),
        }
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
