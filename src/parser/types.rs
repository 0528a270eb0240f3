//! Common types for the configuration parser

use thiserror::Error;

/// Repository entries that reference no upstream repository.
pub const SENTINEL_REPOS: &[&str] = &["local", "meta"];

/// Hosting provider of a hook repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// github.com
    GitHub,
    /// gitlab.com
    GitLab,
}

impl Vendor {
    /// Returns the string representation of the vendor
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::GitHub => "github",
            Vendor::GitLab => "gitlab",
        }
    }

    /// Determine the vendor of a repository from its URL.
    ///
    /// Returns `None` for hosts this tool has no tag source for; the caller
    /// reports those repositories as unsupported instead of failing the run.
    pub fn from_url(url: &str) -> Option<Vendor> {
        if url.contains("github.com") {
            Some(Vendor::GitHub)
        } else if url.contains("gitlab.com") {
            Some(Vendor::GitLab)
        } else {
            None
        }
    }
}

/// One `repos:` entry of the configuration file.
///
/// `rev_start..rev_end` is the byte range of the revision scalar in the
/// source text, surrounding quotes excluded, so the writer can splice a new
/// version in place without reformatting the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    pub url: String,
    /// Pinned revision, empty when the entry has no `rev` key.
    pub rev: String,
    pub rev_start: usize,
    pub rev_end: usize,
}

impl RepoEntry {
    /// True for the `local` / `meta` pseudo-entries.
    pub fn is_sentinel(&self) -> bool {
        SENTINEL_REPOS.contains(&self.url.as_str())
    }
}

/// The parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreCommitConfig {
    pub repos: Vec<RepoEntry>,
}

/// A structurally valid YAML document that is not a usable pre-commit config.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no repositories found in config")]
    NoRepos,

    #[error("repository URL is empty")]
    EmptyRepoUrl,

    #[error("revision is empty for repository: {0}")]
    MissingRev(String),
}

impl PreCommitConfig {
    /// Check required fields: at least one repository, and every non-sentinel
    /// entry pinned to a revision.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repos.is_empty() {
            return Err(ConfigError::NoRepos);
        }

        for repo in &self.repos {
            if repo.url.is_empty() {
                return Err(ConfigError::EmptyRepoUrl);
            }
            if !repo.is_sentinel() && repo.rev.is_empty() {
                return Err(ConfigError::MissingRev(repo.url.clone()));
            }
        }

        Ok(())
    }

    /// Entries worth checking upstream, with sentinels filtered out.
    pub fn hook_repos(&self) -> Vec<&RepoEntry> {
        self.repos.iter().filter(|r| !r.is_sentinel()).collect()
    }
}
