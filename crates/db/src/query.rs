//! Paginated list queries with bound filter values.
//!
//! Table, column and projection names are `&'static str`, so only text
//! compiled into the binary is ever interpolated. The one exception is the
//! sort column, which comes from a [`FilterSortSpec`] that has already passed
//! its safelist check. Every filter value, the limit and the offset are bound
//! parameters.

use std::time::Instant;

use pso_core::error::CoreError;
use pso_core::filters::FilterSortSpec;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres, QueryBuilder, Row};

use crate::database::Deadline;
use crate::error::classify;

/// A single `WHERE` predicate.
///
/// Empty strings and empty lists match every row, so unset filters can be
/// passed straight through.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `(col = $v OR $v = '')`
    Equals(&'static str, String),
    /// `(col = ANY($v) OR cardinality($v) = 0)` for a scalar column.
    AnyOf(&'static str, Vec<String>),
    /// `(col @> $v OR cardinality($v) = 0)` for an array column.
    ContainsAll(&'static str, Vec<String>),
    /// `(col && $v OR cardinality($v) = 0)` for an array column.
    Overlaps(&'static str, Vec<String>),
    /// `col = $v`, always applied.
    Is(&'static str, bool),
}

#[derive(Debug)]
pub struct ListQuery<'s> {
    source: &'static str,
    columns: &'static str,
    primary_key: &'static str,
    spec: &'s FilterSortSpec,
    conditions: Vec<Condition>,
}

impl<'s> ListQuery<'s> {
    pub fn new(
        source: &'static str,
        columns: &'static str,
        primary_key: &'static str,
        spec: &'s FilterSortSpec,
    ) -> Self {
        Self {
            source,
            columns,
            primary_key,
            spec,
            conditions: Vec::new(),
        }
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    fn build(&self) -> Result<QueryBuilder<'static, Postgres>, CoreError> {
        let sort_column = self.spec.sort_column();
        if !is_identifier(sort_column) {
            return Err(CoreError::Internal(format!(
                "refusing to sort {} by {sort_column:?}",
                self.source
            )));
        }

        let mut qb = QueryBuilder::new(format!(
            "SELECT COUNT(*) OVER() AS total_count, {} FROM {} WHERE TRUE",
            self.columns, self.source
        ));

        for condition in &self.conditions {
            qb.push(" AND ");
            match condition {
                Condition::Equals(column, value) => {
                    qb.push("(")
                        .push(column)
                        .push(" = ")
                        .push_bind(value.clone())
                        .push(" OR ")
                        .push_bind(value.clone())
                        .push(" = '')");
                }
                Condition::AnyOf(column, values) => {
                    qb.push("(")
                        .push(column)
                        .push(" = ANY(")
                        .push_bind(values.clone())
                        .push(") OR cardinality(")
                        .push_bind(values.clone())
                        .push(") = 0)");
                }
                Condition::ContainsAll(column, values) => {
                    qb.push("(")
                        .push(column)
                        .push(" @> ")
                        .push_bind(values.clone())
                        .push(" OR cardinality(")
                        .push_bind(values.clone())
                        .push(") = 0)");
                }
                Condition::Overlaps(column, values) => {
                    qb.push("(")
                        .push(column)
                        .push(" && ")
                        .push_bind(values.clone())
                        .push(" OR cardinality(")
                        .push_bind(values.clone())
                        .push(") = 0)");
                }
                Condition::Is(column, value) => {
                    qb.push(column).push(" = ").push_bind(*value);
                }
            }
        }

        qb.push(format!(
            " ORDER BY {sort_column} {}, {} ASC LIMIT ",
            self.spec.sort_direction(),
            self.primary_key
        ));
        qb.push_bind(self.spec.limit());
        qb.push(" OFFSET ");
        qb.push_bind(self.spec.offset());

        Ok(qb)
    }

    /// The SQL text that [`ListQuery::fetch_page`] will execute.
    pub fn sql(&self) -> Result<String, CoreError> {
        Ok(self.build()?.into_sql())
    }

    /// Run the query, returning one page of rows and the pre-pagination
    /// match count.
    ///
    /// A page past the end yields no rows, and therefore a count of zero.
    pub async fn fetch_page<T>(&self, deadline: &Deadline<'_>) -> Result<(Vec<T>, i64), CoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let entity = deadline.entity();
        let mut qb = self.build()?;
        let started = Instant::now();

        let rows = deadline
            .run(qb.build().fetch_all(deadline.pool()))
            .await?;

        let total = match rows.first() {
            Some(row) => row
                .try_get::<i64, _>("total_count")
                .map_err(|e| classify(entity, e))?,
            None => 0,
        };
        let items = rows
            .iter()
            .map(T::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| classify(entity, e))?;

        tracing::debug!(
            entity,
            sort = self.spec.sort(),
            page = self.spec.page(),
            rows = items.len(),
            total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "List query"
        );

        Ok((items, total))
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
