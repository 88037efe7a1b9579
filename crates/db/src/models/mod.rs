//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) applied onto a fetched
//!   entity before it is written back under its version guard

pub mod assignment;
pub mod comment;
pub mod project;
pub mod resource;
pub mod resource_request;

/// Overwrite `target` when the patch carries a value.
fn patch<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
