//! hookbump checks the hook repositories pinned in a `.pre-commit-config.yaml`
//! file against their upstream hosts and, when a newer semantically-versioned
//! tag exists and the configured bump policy permits it, rewrites the pinned
//! revision in place.

pub mod bump;
pub mod config;
pub mod parser;
pub mod version;
