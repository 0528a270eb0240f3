//! Allowed-bump policy
//!
//! The `--allow` flag caps how large an automatic update may be. The ceiling
//! is ordered `patch < minor < major`; each ceiling permits its own magnitude
//! and everything below it.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

use crate::version::semver::{BumpKind, SemanticVersion};

/// Maximum bump magnitude an update is allowed to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BumpPolicy {
    /// Any newer version is acceptable.
    #[default]
    Major,
    /// Minor and patch bumps only.
    Minor,
    /// Patch bumps only.
    Patch,
}

/// A policy string outside the `major|minor|patch` set.
///
/// Callers must treat this as "nothing allowed": the ceiling fails closed
/// instead of defaulting to a permissive value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid bump policy: {0}. Allowed values are: major, minor, patch")]
pub struct InvalidPolicy(String);

impl BumpPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpPolicy::Major => "major",
            BumpPolicy::Minor => "minor",
            BumpPolicy::Patch => "patch",
        }
    }

    /// Whether a bump of the given magnitude fits under this ceiling.
    ///
    /// [`BumpKind::None`] (equal, older, or no comparable difference) is
    /// rejected by every ceiling.
    pub fn allows(self, bump: BumpKind) -> bool {
        match bump {
            BumpKind::Major => self == BumpPolicy::Major,
            BumpKind::Minor => self != BumpPolicy::Patch,
            BumpKind::Patch => true,
            BumpKind::None => false,
        }
    }
}

impl fmt::Display for BumpPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpPolicy {
    type Err = InvalidPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(BumpPolicy::Major),
            "minor" => Ok(BumpPolicy::Minor),
            "patch" => Ok(BumpPolicy::Patch),
            other => Err(InvalidPolicy(other.to_string())),
        }
    }
}

/// Decide whether adopting `candidate` over `baseline` fits under `ceiling`.
///
/// A missing baseline (the pinned revision did not parse as a version) means
/// there is no reference point to classify the bump against, so the update is
/// never allowed.
pub fn is_allowed(
    candidate: &SemanticVersion,
    baseline: Option<&SemanticVersion>,
    ceiling: BumpPolicy,
) -> bool {
    let Some(baseline) = baseline else {
        return false;
    };
    ceiling.allows(candidate.bump_kind_from(baseline))
}
