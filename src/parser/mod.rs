//! Configuration file parsing
//!
//! - [`pre_commit`]: tree-sitter based `.pre-commit-config.yaml` parser
//! - [`types`]: repository entries, vendors, and document validation

pub mod pre_commit;
pub mod types;
