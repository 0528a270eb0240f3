//! Runtime settings and shared constants

use std::path::PathBuf;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::version::policy::BumpPolicy;

/// Default location of the pre-commit configuration file
pub const DEFAULT_CONFIG_PATH: &str = ".pre-commit-config.yaml";

/// File the update summary is rendered to
pub const SUMMARY_PATH: &str = "summary.md";

/// Timeout for a single tag-list fetch
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Delay between starting each fetch request to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

/// User agent sent with every host API request
pub const USER_AGENT: &str = concat!("hookbump/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the log filter (tracing `EnvFilter` syntax)
pub const LOG_ENV_VAR: &str = "HOOKBUMP_LOG";

/// Per-invocation settings assembled from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path to the pre-commit configuration file
    pub config_path: PathBuf,

    /// Maximum bump magnitude an update may apply
    pub allow: BumpPolicy,

    /// Log the would-be changes without modifying files (update only)
    pub dry_run: bool,

    /// Skip writing the summary file (update only)
    pub no_summary: bool,
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `HOOKBUMP_LOG` takes precedence; otherwise `-v` selects debug and the
/// default is info.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
