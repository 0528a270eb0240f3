//! Latest-version selection over a raw tag list

use thiserror::Error;

use crate::version::observer::UpdateObserver;
use crate::version::semver::SemanticVersion;

/// None of a repository's tags parsed as a semantic version.
///
/// A per-repository failure: it is carried in that repository's decision
/// record and never aborts the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no semantic version tags found for {repo} (rev: {current_rev})")]
pub struct NoValidTags {
    pub repo: String,
    pub current_rev: String,
}

/// Pick the newest version among `tags` under numeric-triple ordering.
///
/// Tags that do not contain a semantic version are reported to the observer
/// and skipped. Ties on the triple (differing only in pre-release or build
/// metadata) keep the first tag encountered, in the order tags were supplied.
pub fn select_latest(
    tags: &[String],
    repo: &str,
    current_rev: &str,
    observer: &dyn UpdateObserver,
) -> Result<SemanticVersion, NoValidTags> {
    let mut latest: Option<SemanticVersion> = None;

    for tag in tags {
        let Some(parsed) = SemanticVersion::parse(tag) else {
            observer.tag_discarded(repo, tag);
            continue;
        };

        if latest
            .as_ref()
            .is_none_or(|best| parsed.is_newer_than(best))
        {
            latest = Some(parsed);
        }
    }

    latest.ok_or_else(|| NoValidTags {
        repo: repo.to_string(),
        current_rev: current_rev.to_string(),
    })
}
