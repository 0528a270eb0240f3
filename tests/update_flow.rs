use std::fs;
use std::io::Write as _;

use mockito::{Server, ServerGuard};
use tempfile::NamedTempFile;

use hookbump::bump::Bumper;
use hookbump::config::Settings;
use hookbump::version::policy::BumpPolicy;
use hookbump::version::registries::{GitHubTags, GitLabTags};
use hookbump::version::registry::TagSource;

const CONFIG: &str = "\
repos:
  - repo: https://github.com/psf/black
    rev: 23.1.0
    hooks:
      - id: black
  - repo: https://gitlab.com/pycqa/flake8
    rev: 6.0.0
    hooks:
      - id: flake8
  - repo: local
    hooks:
      - id: my-script
        entry: ./run.sh
        language: script
";

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn settings(path: &std::path::Path, allow: BumpPolicy, dry_run: bool) -> Settings {
    Settings {
        config_path: path.to_path_buf(),
        allow,
        dry_run,
        no_summary: true,
    }
}

fn sources_for(server: &ServerGuard) -> Vec<Box<dyn TagSource>> {
    vec![
        Box::new(GitHubTags::new(&server.url())),
        Box::new(GitLabTags::new(&server.url())),
    ]
}

async fn mock_black_tags(server: &mut ServerGuard, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/repos/psf/black/git/refs/tags")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn mock_flake8_tags(server: &mut ServerGuard, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/api/v4/projects/pycqa%2Fflake8/repository/tags")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn update_rewrites_revisions_across_hosts_and_skips_sentinels() {
    let mut server = Server::new_async().await;
    let github = mock_black_tags(
        &mut server,
        r#"[{"ref": "refs/tags/23.1.0"}, {"ref": "refs/tags/23.3.0"}, {"ref": "refs/tags/stable"}]"#,
    )
    .await;
    let gitlab = mock_flake8_tags(
        &mut server,
        r#"[{"name": "6.0.0"}, {"name": "6.1.0"}]"#,
    )
    .await;

    let file = write_config(CONFIG);
    let bumper = Bumper::with_sources(
        settings(file.path(), BumpPolicy::Major, false),
        sources_for(&server),
    );

    let summary = bumper.update().await.unwrap();

    github.assert_async().await;
    gitlab.assert_async().await;

    assert_eq!(summary.updates_available(), 2);
    assert_eq!(summary.failed(), 0);

    let updated = fs::read_to_string(file.path()).unwrap();
    assert_eq!(updated, CONFIG.replace("23.1.0", "23.3.0").replace("6.0.0", "6.1.0"));
}

#[tokio::test]
async fn minor_ceiling_blocks_major_bump_but_reports_it() {
    let mut server = Server::new_async().await;
    let _github = mock_black_tags(
        &mut server,
        r#"[{"ref": "refs/tags/23.1.0"}, {"ref": "refs/tags/24.0.0"}]"#,
    )
    .await;
    let _gitlab = mock_flake8_tags(
        &mut server,
        r#"[{"name": "6.0.1"}]"#,
    )
    .await;

    let file = write_config(CONFIG);
    let bumper = Bumper::with_sources(
        settings(file.path(), BumpPolicy::Minor, false),
        sources_for(&server),
    );

    let summary = bumper.update().await.unwrap();

    // flake8 patch bump is within the ceiling, black's major bump is not.
    assert_eq!(summary.updates_available(), 1);
    let black = &summary.decisions[0].decision;
    assert!(!black.update_allowed);
    assert!(black.newer_disallowed);

    let updated = fs::read_to_string(file.path()).unwrap();
    assert!(updated.contains("rev: 23.1.0"));
    assert!(updated.contains("rev: 6.0.1"));
}

#[tokio::test]
async fn repo_without_version_tags_fails_alone() {
    let mut server = Server::new_async().await;
    let _github = mock_black_tags(
        &mut server,
        r#"[{"ref": "refs/tags/nightly"}, {"ref": "refs/tags/stable"}]"#,
    )
    .await;
    let _gitlab = mock_flake8_tags(
        &mut server,
        r#"[{"name": "6.1.0"}]"#,
    )
    .await;

    let file = write_config(CONFIG);
    let bumper = Bumper::with_sources(
        settings(file.path(), BumpPolicy::Major, false),
        sources_for(&server),
    );

    let summary = bumper.update().await.unwrap();

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.updates_available(), 1);

    let updated = fs::read_to_string(file.path()).unwrap();
    assert!(updated.contains("rev: 23.1.0")); // unresolved repo left alone
    assert!(updated.contains("rev: 6.1.0"));
}

#[tokio::test]
async fn dry_run_reports_updates_without_writing() {
    let mut server = Server::new_async().await;
    let _github = mock_black_tags(&mut server, r#"[{"ref": "refs/tags/23.3.0"}]"#).await;
    let _gitlab = mock_flake8_tags(&mut server, r#"[{"name": "6.1.0"}]"#).await;

    let file = write_config(CONFIG);
    let bumper = Bumper::with_sources(
        settings(file.path(), BumpPolicy::Major, true),
        sources_for(&server),
    );

    let summary = bumper.update().await.unwrap();

    assert_eq!(summary.updates_available(), 2);
    assert_eq!(fs::read_to_string(file.path()).unwrap(), CONFIG);
}

#[tokio::test]
async fn check_never_modifies_the_file() {
    let mut server = Server::new_async().await;
    let _github = mock_black_tags(&mut server, r#"[{"ref": "refs/tags/23.3.0"}]"#).await;
    let _gitlab = mock_flake8_tags(&mut server, r#"[{"name": "6.0.0"}]"#).await;

    let file = write_config(CONFIG);
    let bumper = Bumper::with_sources(
        settings(file.path(), BumpPolicy::Major, false),
        sources_for(&server),
    );

    let summary = bumper.check().await.unwrap();

    assert_eq!(summary.updates_available(), 1); // black only, flake8 up to date
    assert_eq!(fs::read_to_string(file.path()).unwrap(), CONFIG);
}
