//! GitHub tag source
//!
//! Lists a repository's tags through the git refs API
//! (`/repos/{owner}/{repo}/git/refs/tags`); ref names come back as
//! `refs/tags/<name>` and are stripped down to the bare tag name.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::config::{HTTP_TIMEOUT, USER_AGENT};
use crate::parser::types::Vendor;
use crate::version::error::RegistryError;
use crate::version::registry::TagSource;

/// Default base URL for the GitHub API
const DEFAULT_BASE_URL: &str = "https://api.github.com";

const REF_PREFIX: &str = "refs/tags/";

/// Owner/repo extracted from both https and ssh remote forms.
static REPO_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com[:/](?P<path>[\w.-]+/[\w.-]+?)(?:\.git)?/?$").unwrap()
});

/// One entry of the git refs response
#[derive(Debug, Deserialize)]
struct TagRef {
    #[serde(rename = "ref")]
    ref_name: String,
}

/// Tag source backed by the GitHub API
pub struct GitHubTags {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubTags {
    /// Creates a new GitHubTags source with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(HTTP_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }
}

impl Default for GitHubTags {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl TagSource for GitHubTags {
    fn vendor(&self) -> Vendor {
        Vendor::GitHub
    }

    async fn fetch_tags(&self, repo_url: &str) -> Result<Vec<String>, RegistryError> {
        let repo_path = extract_repo_path(repo_url)
            .ok_or_else(|| RegistryError::BadRepoUrl(repo_url.to_string()))?;
        let url = format!("{}/repos/{}/git/refs/tags", self.base_url, repo_path);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(repo_path));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(RegistryError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let refs: Vec<TagRef> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub refs response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(refs
            .into_iter()
            .map(|r| {
                let name = r.ref_name;
                name.strip_prefix(REF_PREFIX)
                    .map(str::to_string)
                    .unwrap_or(name)
            })
            .collect())
    }
}

/// Extract `owner/repo` from a GitHub repository URL, https or ssh form.
fn extract_repo_path(repo_url: &str) -> Option<String> {
    REPO_PATH_RE
        .captures(repo_url)
        .map(|captures| captures["path"].to_string())
}
