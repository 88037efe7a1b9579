//! Pure domain logic for the PSO record-management service.
//!
//! Everything in this crate is free of database access: request-parameter
//! parsing, filter/sort validation, pagination arithmetic, field validation,
//! and the optimistic-concurrency rules shared by every repository in
//! `pso-db`.

pub mod allowed;
pub mod concurrency;
pub mod error;
pub mod filters;
pub mod listing;
pub mod pagination;
pub mod params;
pub mod rules;
pub mod types;
pub mod validation;
