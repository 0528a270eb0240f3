//! Tag source trait for fetching tag names from version-control hosts

#[cfg(test)]
use mockall::automock;

use crate::parser::types::Vendor;
use crate::version::error::RegistryError;

/// Trait for fetching the tag list of a hook repository from its host.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TagSource: Send + Sync {
    /// Returns the hosting provider this source talks to.
    fn vendor(&self) -> Vendor;

    /// Fetches all tag names for a repository.
    ///
    /// # Arguments
    /// * `repo_url` - The repository URL as it appears in the config file
    ///   (e.g., "https://github.com/psf/black")
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Raw tag names, host prefixes already stripped
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_tags(&self, repo_url: &str) -> Result<Vec<String>, RegistryError>;
}
