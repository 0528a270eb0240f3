use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hookbump::bump::{Bumper, RunSummary};
use hookbump::config::{self, Settings};
use hookbump::version::policy::BumpPolicy;

#[derive(Parser)]
#[command(name = "hookbump")]
#[command(version, about = "Keep pre-commit hook revisions up to date")]
struct Cli {
    /// Path to the pre-commit configuration file
    #[arg(short, long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Version bump ceiling to allow (major, minor, patch)
    #[arg(short, long, global = true, value_enum, default_value_t = BumpPolicy::Major)]
    allow: BumpPolicy,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check for available updates without modifying the configuration file.
    /// Exits with a non-zero status when updates are available.
    Check,

    /// Check for available updates and rewrite the configuration file with
    /// the latest allowed versions
    Update {
        /// Show what would change without modifying any file
        #[arg(short, long)]
        dry_run: bool,

        /// Skip writing the summary file
        #[arg(short, long)]
        no_summary: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    config::init_tracing(cli.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Command::Check => {
            let settings = Settings {
                config_path: cli.config,
                allow: cli.allow,
                dry_run: false,
                no_summary: false,
            };
            let summary = runtime.block_on(Bumper::new(settings).check())?;
            fail_on_unresolved(&summary)?;
            if summary.updates_available() > 0 {
                anyhow::bail!("updates are available");
            }
        }
        Command::Update {
            dry_run,
            no_summary,
        } => {
            let settings = Settings {
                config_path: cli.config,
                allow: cli.allow,
                dry_run,
                no_summary,
            };
            let summary = runtime.block_on(Bumper::new(settings).update())?;
            fail_on_unresolved(&summary)?;
        }
    }

    Ok(())
}

/// Per-repository failures never abort the run, but they do fail it.
fn fail_on_unresolved(summary: &RunSummary) -> anyhow::Result<()> {
    if summary.failed() > 0 {
        anyhow::bail!("{} repositories could not be checked", summary.failed());
    }
    Ok(())
}
