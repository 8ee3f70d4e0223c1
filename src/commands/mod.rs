// ABOUTME: Command module aggregator for the github-deployments CLI.
// ABOUTME: Re-exports list, update, update-by-state, and deactivate handlers.

mod deactivate;
pub mod deployments;
mod list;
mod update;
mod update_by_state;

pub use deactivate::{deactivate, deactivate_deployments};
pub use list::{DEFAULT_LIMIT, ListOptions, list, list_deployments};
pub use update::{update, update_deployments};
pub use update_by_state::{UpdateByStateOptions, update_by_state, update_by_state_deployments};
