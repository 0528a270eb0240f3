//! Concrete tag source implementations

pub mod github;
pub mod gitlab;

pub use github::GitHubTags;
pub use gitlab::GitLabTags;
