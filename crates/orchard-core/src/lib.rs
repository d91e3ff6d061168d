//! Core types for Orchard: project configuration, run context, git version
//! discovery, and the bounded task group used to fan out sync operations.

pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod parallel;

pub use context::{Context, Credentials};
pub use error::{ConfigError, CoreError, GitError, Result};
pub use parallel::TaskGroup;
