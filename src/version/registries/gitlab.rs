//! GitLab tag source
//!
//! Lists a project's tags through `/api/v4/projects/{id}/repository/tags`,
//! where the project id is the URL-encoded `group/project` path. Nested
//! groups are part of the path and survive the encoding.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::config::{HTTP_TIMEOUT, USER_AGENT};
use crate::parser::types::Vendor;
use crate::version::error::RegistryError;
use crate::version::registry::TagSource;

/// Default base URL for the GitLab API
const DEFAULT_BASE_URL: &str = "https://gitlab.com";

/// Project path extracted from both https and ssh remote forms; may span
/// nested groups.
static PROJECT_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gitlab\.com[:/](?P<path>.+?)(?:\.git)?/?$").unwrap());

/// One entry of the repository tags response
#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Tag source backed by the GitLab API
pub struct GitLabTags {
    client: reqwest::Client,
    base_url: String,
}

impl GitLabTags {
    /// Creates a new GitLabTags source with a custom base URL
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

impl Default for GitLabTags {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl TagSource for GitLabTags {
    fn vendor(&self) -> Vendor {
        Vendor::GitLab
    }

    async fn fetch_tags(&self, repo_url: &str) -> Result<Vec<String>, RegistryError> {
        let project_path = extract_project_path(repo_url)
            .ok_or_else(|| RegistryError::BadRepoUrl(repo_url.to_string()))?;
        let url = format!(
            "{}/api/v4/projects/{}/repository/tags",
            self.base_url,
            urlencoding::encode(&project_path)
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(project_path));
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
            warn!("GitLab API returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let tags: Vec<Tag> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitLab tags response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(tags.into_iter().map(|t| t.name).collect())
    }
}

/// Extract the `group/project` path from a GitLab repository URL.
fn extract_project_path(repo_url: &str) -> Option<String> {
    PROJECT_PATH_RE
        .captures(repo_url)
        .map(|captures| captures["path"].to_string())
}
