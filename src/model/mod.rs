// ABOUTME: Domain records decoded from the GitHub deployments API.
// ABOUTME: Re-exports deployment and status types.

mod deployment;
mod status;

pub use deployment::{Deployment, Deployments, User};
pub use status::{NewStatus, Status};
