//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` (or any `PgExecutor`) as the first argument.

pub mod deadline_history_repo;
pub mod deadline_request_repo;
pub mod task_repo;

pub use deadline_history_repo::DeadlineHistoryRepo;
pub use deadline_request_repo::DeadlineRequestRepo;
pub use task_repo::TaskRepo;
