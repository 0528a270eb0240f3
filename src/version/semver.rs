//! Semantic version parsing and comparison
//!
//! Revision strings coming out of a pre-commit config or a tag list are
//! loosely formed: `v1.2.3`, `refs/tags/1.2.3`, sometimes a whole URL with the
//! version buried in a query parameter. [`SemanticVersion::parse`] scans for
//! the first well-formed `major.minor.patch[-pre][+build]` substring instead
//! of requiring the input to be exactly a version.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Pattern from <https://semver.org/>, unanchored so the version may be
/// embedded anywhere in the input. Major/minor/patch reject leading zeros.
static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<major>0|[1-9]\d*)\.(?P<minor>0|[1-9]\d*)\.(?P<patch>0|[1-9]\d*)",
        r"(?:-(?P<prerelease>(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)",
        r"(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
        r"(?:\+(?P<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?",
    ))
    .unwrap()
});

/// A parsed semantic version.
///
/// Pre-release and build metadata are captured verbatim but do not take part
/// in ordering; only the numeric triple is compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Identifiers after the `-` marker, empty when absent.
    pub pre_release: String,
    /// Identifiers after the `+` marker, empty when absent.
    pub build_metadata: String,
}

/// Magnitude of the difference between a candidate version and a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    /// Candidate is equal to or older than the baseline.
    None,
}

impl SemanticVersion {
    /// Extract the first semantic version embedded in `raw`.
    ///
    /// Returns `None` when no well-formed version appears anywhere in the
    /// input. Callers treat that as "skip this string", never as an error.
    ///
    /// * Leading text (a `v` prefix, a URL, a stray `-`) is ignored.
    /// * Trailing text after the match (`1.0.0.1`) is ignored.
    /// * A `-` or `+` marker with nothing behind it leaves the field empty.
    /// * Leading zeros in the numeric triple (`01.02.03`) never match.
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = SEMVER_RE.captures(raw)?;

        // The numeric groups reject leading zeros; a digit run overflowing
        // u64 is not a version either.
        let major = captures.name("major")?.as_str().parse().ok()?;
        let minor = captures.name("minor")?.as_str().parse().ok()?;
        let patch = captures.name("patch")?.as_str().parse().ok()?;

        let group = |name: &str| {
            captures
                .name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        Some(Self {
            major,
            minor,
            patch,
            pre_release: group("prerelease"),
            build_metadata: group("buildmetadata"),
        })
    }

    /// True iff `self`'s (major, minor, patch) triple is strictly greater
    /// than `other`'s. Pre-release and build metadata are not ranked, so two
    /// versions with the same triple are never newer than each other.
    pub fn is_newer_than(&self, other: &Self) -> bool {
        self.triple() > other.triple()
    }

    /// Classify how `self` differs from `baseline`.
    ///
    /// Returns [`BumpKind::None`] when `self` is equal to or older than the
    /// baseline, including the case where only pre-release or build metadata
    /// differ.
    pub fn bump_kind_from(&self, baseline: &Self) -> BumpKind {
        if self.major > baseline.major {
            BumpKind::Major
        } else if self.major == baseline.major && self.minor > baseline.minor {
            BumpKind::Minor
        } else if self.major == baseline.major
            && self.minor == baseline.minor
            && self.patch > baseline.patch
        {
            BumpKind::Patch
        } else {
            BumpKind::None
        }
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl fmt::Display for SemanticVersion {
    /// Canonical `major.minor.patch[-pre][+build]` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata)?;
        }
        Ok(())
    }
}
