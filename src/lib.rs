// ABOUTME: Library root for github-deployments - exposes the API client and commands.
// ABOUTME: The main binary is in main.rs.

pub mod client;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fanout;
pub mod model;
pub mod output;
pub mod types;
