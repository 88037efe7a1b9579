//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&Database` as the first argument. Every method runs under the
//! database's per-call deadline and returns [`CoreError`](pso_core::error::CoreError).

pub mod assignment_repo;
pub mod comment_repo;
pub mod project_repo;
pub mod resource_repo;
pub mod resource_request_repo;

pub use assignment_repo::AssignmentRepo;
pub use comment_repo::CommentRepo;
pub use project_repo::ProjectRepo;
pub use resource_repo::ResourceRepo;
pub use resource_request_repo::ResourceRequestRepo;
