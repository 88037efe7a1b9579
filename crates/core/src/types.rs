/// All database primary keys are PostgreSQL BIGINT.
pub type DbId = i64;

/// Optimistic-concurrency version counter carried by every mutable row.
pub type Version = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (request start dates, assignment windows).
pub type Date = chrono::NaiveDate;
