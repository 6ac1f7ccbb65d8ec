//! Shared test utilities for the jsonconf workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`project`]: [`TestProject`], a temporary project root with helpers for
//!   writing manifests and configuration files and asserting on their content

pub mod project;

pub use project::TestProject;
