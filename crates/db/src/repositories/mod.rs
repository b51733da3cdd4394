//! One repository per table. Every call takes the resolved session and
//! forwards its access token so the store applies row policies for the
//! signed-in principal.

pub mod comment_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod task_repo;

pub use comment_repo::CommentRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;

/// Trimmed optional text, `None` when blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
