//! Update orchestration
//!
//! [`Bumper`] ties the pieces together: parse the configuration file, resolve
//! a tag source per repository, fetch tag lists concurrently, hand everything
//! to the decision engine, and finally let [`writer`] apply the allowed
//! updates. The engine itself never sees a URL scheme or an HTTP client; by
//! the time it runs, each repository is just a revision plus a tag list.

pub mod writer;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use futures::future::join_all;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::{FETCH_STAGGER_DELAY_MS, SUMMARY_PATH, Settings};
use crate::parser::pre_commit::{ParseError, PreCommitParser};
use crate::parser::types::{ConfigError, RepoEntry, Vendor};
use crate::version::engine::{RepoCandidates, UpdateDecision, decide_repo};
use crate::version::observer::{TracingObserver, UpdateObserver};
use crate::version::registries::{GitHubTags, GitLabTags};
use crate::version::registry::TagSource;

/// A repository entry paired with the decision reached for it.
#[derive(Debug)]
pub struct RepoDecision {
    pub entry: RepoEntry,
    pub decision: UpdateDecision,
}

/// All decisions of one run, in configuration order.
#[derive(Debug)]
pub struct RunSummary {
    pub decisions: Vec<RepoDecision>,
}

impl RunSummary {
    /// Repositories with a permitted update.
    pub fn updates_available(&self) -> usize {
        self.decisions
            .iter()
            .filter(|d| d.decision.update_allowed)
            .count()
    }

    /// Repositories that could not be resolved.
    pub fn failed(&self) -> usize {
        self.decisions
            .iter()
            .filter(|d| d.decision.failure.is_some())
            .count()
    }
}

#[derive(Debug, Error)]
pub enum BumpError {
    #[error("failed to read config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Invalid(#[from] ConfigError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Coordinates one check or update run over a configuration file.
pub struct Bumper {
    settings: Settings,
    sources: Vec<Box<dyn TagSource>>,
    observer: Box<dyn UpdateObserver>,
}

impl Bumper {
    /// Bumper with the real GitHub and GitLab tag sources.
    pub fn new(settings: Settings) -> Self {
        Self::with_sources(
            settings,
            vec![Box::new(GitHubTags::default()), Box::new(GitLabTags::default())],
        )
    }

    /// Bumper with caller-supplied tag sources; used by tests to point at
    /// mock servers or mock sources.
    pub fn with_sources(settings: Settings, sources: Vec<Box<dyn TagSource>>) -> Self {
        Self {
            settings,
            sources,
            observer: Box::new(TracingObserver),
        }
    }

    /// Check every repository without touching any file.
    pub async fn check(&self) -> Result<RunSummary, BumpError> {
        let (_, decisions) = self.resolve_decisions().await?;
        Ok(RunSummary { decisions })
    }

    /// Check every repository and rewrite the configuration file with the
    /// allowed updates. Also renders the summary file unless disabled.
    pub async fn update(&self) -> Result<RunSummary, BumpError> {
        let (content, decisions) = self.resolve_decisions().await?;
        let summary = RunSummary { decisions };

        if summary.updates_available() == 0 {
            info!("All hook repositories are up to date");
            return Ok(summary);
        }

        if self.settings.dry_run {
            for repo_decision in &summary.decisions {
                let decision = &repo_decision.decision;
                if let Some(latest) = decision.latest_found.as_ref().filter(|_| decision.update_allowed) {
                    info!(
                        "Would update {} from {} to {}",
                        decision.repo, decision.current_rev, latest
                    );
                }
            }
            info!("Dry run enabled, leaving {} untouched", self.settings.config_path.display());
            return Ok(summary);
        }

        let updated = writer::apply_updates(&content, &summary.decisions);
        fs::write(&self.settings.config_path, updated).map_err(|source| BumpError::Write {
            path: self.settings.config_path.clone(),
            source,
        })?;
        info!("Updated {}", self.settings.config_path.display());

        if !self.settings.no_summary {
            let rendered = writer::render_summary(&summary.decisions);
            fs::write(SUMMARY_PATH, rendered).map_err(|source| BumpError::Write {
                path: PathBuf::from(SUMMARY_PATH),
                source,
            })?;
            info!("Wrote {}", SUMMARY_PATH);
        }

        Ok(summary)
    }

    /// Parse and validate the config, then decide every repository.
    async fn resolve_decisions(&self) -> Result<(String, Vec<RepoDecision>), BumpError> {
        let path = &self.settings.config_path;
        debug!("Parsing configuration file: {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| BumpError::ReadConfig {
            path: path.clone(),
            source,
        })?;

        let config = PreCommitParser::new().parse(&content)?;
        config.validate()?;

        let entries: Vec<RepoEntry> = config.hook_repos().into_iter().cloned().collect();
        debug!("Checking {} hook repositories", entries.len());

        let decisions = self.check_repos(entries).await;
        Ok((content, decisions))
    }

    /// Fetch and decide all repositories concurrently, one future per entry.
    ///
    /// `join_all` preserves input order, so each repository's decision lands
    /// in its own slot. Fetch starts are staggered to be polite to the host
    /// APIs.
    async fn check_repos(&self, entries: Vec<RepoEntry>) -> Vec<RepoDecision> {
        let futures = entries.into_iter().enumerate().map(|(i, entry)| {
            let delay = Duration::from_millis(FETCH_STAGGER_DELAY_MS * i as u64);
            async move {
                sleep(delay).await;
                let decision = self.check_single(&entry).await;
                RepoDecision { entry, decision }
            }
        });

        join_all(futures).await
    }

    /// Resolve the tag source for one repository, fetch its tags, and run
    /// the engine. Fetch problems become per-repository failure decisions.
    async fn check_single(&self, entry: &RepoEntry) -> UpdateDecision {
        debug!("Checking repo: {}, current rev: {}", entry.url, entry.rev);

        let Some(vendor) = Vendor::from_url(&entry.url) else {
            return self.fail_fetch(entry, format!("unsupported repository host: {}", entry.url));
        };
        let Some(source) = self.source_for(vendor) else {
            return self.fail_fetch(
                entry,
                format!("no tag source configured for {}", vendor.as_str()),
            );
        };

        match source.fetch_tags(&entry.url).await {
            Ok(tags) => decide_repo(
                &RepoCandidates {
                    repo: entry.url.clone(),
                    current_rev: entry.rev.clone(),
                    tags,
                },
                self.settings.allow,
                self.observer.as_ref(),
            ),
            Err(e) => self.fail_fetch(entry, e.to_string()),
        }
    }

    fn fail_fetch(&self, entry: &RepoEntry, message: String) -> UpdateDecision {
        let decision = UpdateDecision::fetch_failure(&entry.url, &entry.rev, message);
        self.observer.decision_made(&decision);
        decision
    }

    fn source_for(&self, vendor: Vendor) -> Option<&dyn TagSource> {
        self.sources
            .iter()
            .find(|source| source.vendor() == vendor)
            .map(|source| source.as_ref())
    }
}
