//! Update decision engine
//!
//! Pure computation: given each repository's pinned revision and its
//! already-fetched tag list, produce one [`UpdateDecision`] per repository.
//! Fetching, file rewriting, and logging all live with the callers; the
//! engine only ever sees strings and reports through the observer seam.

use thiserror::Error;

use crate::version::observer::UpdateObserver;
use crate::version::policy::{BumpPolicy, is_allowed};
use crate::version::selector::{NoValidTags, select_latest};
use crate::version::semver::SemanticVersion;

/// Input for one repository: its identifier, the pinned revision, and the
/// raw tag names fetched from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCandidates {
    pub repo: String,
    pub current_rev: String,
    pub tags: Vec<String>,
}

/// Why a repository produced no usable comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionFailure {
    #[error(transparent)]
    NoValidTags(#[from] NoValidTags),

    /// The tag-fetch collaborator failed; attached by the caller, never
    /// produced by the engine itself.
    #[error("failed to fetch tags: {0}")]
    Fetch(String),
}

/// Outcome of checking one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDecision {
    pub repo: String,
    pub current_rev: String,
    /// The pinned revision parsed as a version, if it is one.
    pub current_version: Option<SemanticVersion>,
    /// Newest version found among the repository's tags.
    pub latest_found: Option<SemanticVersion>,
    /// Whether adopting `latest_found` fits under the bump ceiling.
    pub update_allowed: bool,
    /// A newer version exists but the policy blocks it. Reported for
    /// visibility only; it never changes `update_allowed`.
    pub newer_disallowed: bool,
    pub failure: Option<DecisionFailure>,
}

impl UpdateDecision {
    /// Decision recording that tags could not be fetched for a repository.
    pub fn fetch_failure(repo: &str, current_rev: &str, message: String) -> Self {
        Self {
            repo: repo.to_string(),
            current_rev: current_rev.to_string(),
            current_version: SemanticVersion::parse(current_rev),
            latest_found: None,
            update_allowed: false,
            newer_disallowed: false,
            failure: Some(DecisionFailure::Fetch(message)),
        }
    }
}

/// Decide for a single repository.
pub fn decide_repo(
    candidates: &RepoCandidates,
    ceiling: BumpPolicy,
    observer: &dyn UpdateObserver,
) -> UpdateDecision {
    let current_version = SemanticVersion::parse(&candidates.current_rev);

    let decision = match select_latest(
        &candidates.tags,
        &candidates.repo,
        &candidates.current_rev,
        observer,
    ) {
        Ok(latest) => {
            let update_allowed = is_allowed(&latest, current_version.as_ref(), ceiling);
            let newer_disallowed = current_version
                .as_ref()
                .is_some_and(|current| latest.is_newer_than(current))
                && !update_allowed;

            UpdateDecision {
                repo: candidates.repo.clone(),
                current_rev: candidates.current_rev.clone(),
                current_version,
                latest_found: Some(latest),
                update_allowed,
                newer_disallowed,
                failure: None,
            }
        }
        Err(no_valid_tags) => UpdateDecision {
            repo: candidates.repo.clone(),
            current_rev: candidates.current_rev.clone(),
            current_version,
            latest_found: None,
            update_allowed: false,
            newer_disallowed: false,
            failure: Some(no_valid_tags.into()),
        },
    };

    observer.decision_made(&decision);
    decision
}

/// Decide for every repository, independently.
///
/// One repository failing to resolve never affects another's decision, and
/// output order follows input order.
pub fn decide(
    repos: &[RepoCandidates],
    ceiling: BumpPolicy,
    observer: &dyn UpdateObserver,
) -> Vec<UpdateDecision> {
    repos
        .iter()
        .map(|candidates| decide_repo(candidates, ceiling, observer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::observer::MockUpdateObserver;

    fn quiet_observer() -> MockUpdateObserver {
        let mut observer = MockUpdateObserver::new();
        observer.expect_tag_discarded().return_const(());
        observer.expect_decision_made().return_const(());
        observer
    }

    fn candidates(repo: &str, rev: &str, tags: &[&str]) -> RepoCandidates {
        RepoCandidates {
            repo: repo.to_string(),
            current_rev: rev.to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn allows_update_to_latest_under_major_ceiling() {
        let observer = quiet_observer();
        let input = candidates("repo", "1.0.0", &["v1.0.0", "v2.1.0", "v1.5.0"]);

        let decision = decide_repo(&input, BumpPolicy::Major, &observer);

        assert_eq!(
            decision.latest_found,
            Some(SemanticVersion::parse("2.1.0").unwrap())
        );
        assert!(decision.update_allowed);
        assert!(!decision.newer_disallowed);
        assert_eq!(decision.failure, None);
    }

    #[test]
    fn allows_minor_pre_release_bump_under_major_ceiling() {
        let observer = quiet_observer();
        let input = candidates("repo", "1.0.0", &["v1.0.0", "v1.1.0-alpha.1"]);

        let decision = decide_repo(&input, BumpPolicy::Major, &observer);

        assert_eq!(
            decision.latest_found,
            Some(SemanticVersion::parse("1.1.0-alpha.1").unwrap())
        );
        assert!(decision.update_allowed);
    }

    #[test]
    fn classifies_newer_but_disallowed_without_changing_the_verdict() {
        let observer = quiet_observer();
        let input = candidates("repo", "1.0.0", &["v2.0.0"]);

        let decision = decide_repo(&input, BumpPolicy::Patch, &observer);

        assert!(!decision.update_allowed);
        assert!(decision.newer_disallowed);
        assert_eq!(decision.failure, None);
    }

    #[test]
    fn up_to_date_repo_is_neither_allowed_nor_flagged() {
        let observer = quiet_observer();
        let input = candidates("repo", "2.1.0", &["v1.0.0", "v2.1.0"]);

        let decision = decide_repo(&input, BumpPolicy::Major, &observer);

        assert!(!decision.update_allowed);
        assert!(!decision.newer_disallowed);
    }

    #[test]
    fn unparsable_current_rev_yields_no_baseline_and_no_update() {
        let observer = quiet_observer();
        let input = candidates("repo", "some-branch", &["v3.0.0"]);

        let decision = decide_repo(&input, BumpPolicy::Major, &observer);

        assert_eq!(decision.current_version, None);
        assert_eq!(
            decision.latest_found,
            Some(SemanticVersion::parse("3.0.0").unwrap())
        );
        assert!(!decision.update_allowed);
        // No baseline means "not newer" as well.
        assert!(!decision.newer_disallowed);
    }

    #[test]
    fn no_valid_tags_becomes_a_per_repo_failure() {
        let observer = quiet_observer();
        let input = candidates("https://github.com/x/y", "1.0.0", &["invalid-tag", "not-semver"]);

        let decision = decide_repo(&input, BumpPolicy::Major, &observer);

        assert!(matches!(
            decision.failure,
            Some(DecisionFailure::NoValidTags(_))
        ));
        assert_eq!(decision.latest_found, None);
        assert!(!decision.update_allowed);
    }

    #[test]
    fn one_repo_failure_does_not_affect_the_others() {
        let observer = quiet_observer();
        let repos = vec![
            candidates("a", "1.0.0", &["not-semver"]),
            candidates("b", "1.0.0", &["v1.2.0"]),
        ];

        let decisions = decide(&repos, BumpPolicy::Major, &observer);

        assert_eq!(decisions.len(), 2);
        assert!(decisions[0].failure.is_some());
        assert!(decisions[1].failure.is_none());
        assert!(decisions[1].update_allowed);
    }

    #[test]
    fn decisions_preserve_input_order() {
        let observer = quiet_observer();
        let repos = vec![
            candidates("first", "1.0.0", &["v1.1.0"]),
            candidates("second", "1.0.0", &["v1.2.0"]),
            candidates("third", "1.0.0", &["v1.3.0"]),
        ];

        let decisions = decide(&repos, BumpPolicy::Major, &observer);

        let order: Vec<&str> = decisions.iter().map(|d| d.repo.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn decide_is_idempotent_for_identical_inputs() {
        let observer = quiet_observer();
        let repos = vec![
            candidates("a", "1.0.0", &["v1.1.0", "v2.0.0"]),
            candidates("b", "main", &["not-semver"]),
        ];

        let first = decide(&repos, BumpPolicy::Minor, &observer);
        let second = decide(&repos, BumpPolicy::Minor, &observer);

        assert_eq!(first, second);
    }

    #[test]
    fn every_decision_is_reported_to_the_observer() {
        let mut observer = MockUpdateObserver::new();
        observer.expect_tag_discarded().return_const(());
        observer.expect_decision_made().times(2).return_const(());
        let repos = vec![
            candidates("a", "1.0.0", &["v1.1.0"]),
            candidates("b", "1.0.0", &["not-semver"]),
        ];

        decide(&repos, BumpPolicy::Major, &observer);
    }

    #[test]
    fn fetch_failure_decision_carries_the_message() {
        let decision = UpdateDecision::fetch_failure("repo", "v1.0.0", "boom".to_string());

        assert_eq!(
            decision.failure,
            Some(DecisionFailure::Fetch("boom".to_string()))
        );
        assert_eq!(
            decision.current_version,
            Some(SemanticVersion::parse("1.0.0").unwrap())
        );
        assert!(!decision.update_allowed);
    }
}
