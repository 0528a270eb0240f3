//! Version comparison and update-policy engine
//!
//! This module owns everything between "here is a pile of tag strings" and
//! "this repository may be bumped to X":
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ TagSource   │────▶│   Engine    │────▶│  Decision   │
//! │ (fetch)     │     │ (decide)    │     │  records    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                ┌───────────┼───────────┐
//!                ▼           ▼           ▼
//!         ┌──────────┐ ┌──────────┐ ┌──────────┐
//!         │  Semver  │ │ Selector │ │  Policy  │
//!         │ (parse)  │ │ (latest) │ │ (ceiling)│
//!         └──────────┘ └──────────┘ └──────────┘
//! ```
//!
//! # Modules
//!
//! - [`semver`]: loose semantic-version parsing and tuple-order comparison
//! - [`selector`]: latest-version selection over a raw tag list
//! - [`policy`]: the major/minor/patch bump ceiling
//! - [`engine`]: per-repository decision records
//! - [`observer`]: reporting seam between the engine and its caller
//! - [`registry`]: the async [`registry::TagSource`] trait
//! - [`registries`]: GitHub and GitLab implementations
//! - [`error`]: tag-fetch error types

pub mod engine;
pub mod error;
pub mod observer;
pub mod policy;
pub mod registries;
pub mod registry;
pub mod selector;
pub mod semver;
