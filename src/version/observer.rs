//! Observer seam for the decision engine
//!
//! The engine itself performs no logging or other side effects; everything it
//! wants to report goes through an [`UpdateObserver`] supplied by the caller.
//! The CLI passes [`TracingObserver`]; tests substitute a mock or a recorder.

#[cfg(test)]
use mockall::automock;

use tracing::{debug, info, warn};

use crate::version::engine::UpdateDecision;

/// Receives progress notifications from the decision engine.
#[cfg_attr(test, automock)]
pub trait UpdateObserver: Send + Sync {
    /// A raw tag was discarded because it does not parse as a version.
    fn tag_discarded(&self, repo: &str, tag: &str);

    /// A decision record was produced for a repository.
    fn decision_made(&self, decision: &UpdateDecision);
}

/// Production observer: renders engine events as `tracing` log lines.
pub struct TracingObserver;

impl UpdateObserver for TracingObserver {
    fn tag_discarded(&self, repo: &str, tag: &str) {
        debug!("Discarding tag without a semantic version for {}: {}", repo, tag);
    }

    fn decision_made(&self, decision: &UpdateDecision) {
        if let Some(failure) = &decision.failure {
            warn!("Could not check {}: {}", decision.repo, failure);
            return;
        }

        match &decision.latest_found {
            Some(latest) if decision.update_allowed => {
                info!(
                    "Update available for {}: {} -> {}",
                    decision.repo, decision.current_rev, latest
                );
            }
            Some(latest) if decision.newer_disallowed => {
                info!(
                    "Newer version {} for {} is blocked by the bump policy (current {})",
                    latest, decision.repo, decision.current_rev
                );
            }
            _ => {
                debug!(
                    "{} is up to date at {}",
                    decision.repo, decision.current_rev
                );
            }
        }
    }
}
