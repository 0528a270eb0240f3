//! Result writing: in-place config rewriting and the update summary

use std::fmt::Write as _;

use crate::bump::RepoDecision;

/// Splice every allowed update into the original configuration text.
///
/// Each revision is replaced through the byte range recorded by the parser,
/// applied back to front so earlier ranges stay valid while later ones are
/// rewritten. Everything outside the revision scalars (comments, quoting,
/// indentation) survives byte for byte.
pub fn apply_updates(content: &str, decisions: &[RepoDecision]) -> String {
    let mut edits: Vec<(usize, usize, String)> = decisions
        .iter()
        .filter(|d| d.decision.update_allowed)
        .filter_map(|d| {
            d.decision
                .latest_found
                .as_ref()
                .map(|latest| (d.entry.rev_start, d.entry.rev_end, latest.to_string()))
        })
        .collect();

    edits.sort_by(|a, b| b.0.cmp(&a.0));

    let mut updated = content.to_string();
    for (start, end, replacement) in edits {
        updated.replace_range(start..end, &replacement);
    }

    updated
}

/// Render the run as a markdown summary.
pub fn render_summary(decisions: &[RepoDecision]) -> String {
    let mut buf = String::from("# Pre-commit Hook Update Summary\n\n");

    for repo_decision in decisions {
        let decision = &repo_decision.decision;

        if let Some(failure) = &decision.failure {
            let _ = writeln!(
                buf,
                "- ⚠️ **{}**: {} ({})",
                decision.repo, decision.current_rev, failure
            );
            continue;
        }

        match decision.latest_found.as_ref().filter(|_| decision.update_allowed) {
            Some(latest) => {
                let _ = writeln!(
                    buf,
                    "- ✅ **{}**: {} → {}",
                    decision.repo, decision.current_rev, latest
                );
                let _ = writeln!(
                    buf,
                    "  See changelog at: {}/releases/tag/{}\n",
                    decision.repo, latest
                );
            }
            None => {
                let _ = writeln!(
                    buf,
                    "- ⏸️ **{}**: {} (up to date)",
                    decision.repo, decision.current_rev
                );
            }
        }
    }

    buf
}
