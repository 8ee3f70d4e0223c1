// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod id;
mod repo_slug;
mod state;

pub use id::{DeploymentId, Id, StatusId};
pub use repo_slug::{RepoSlug, RepoSlugError};
pub use state::{DeploymentState, ParseStateError};
