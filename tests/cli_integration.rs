//! Integration tests for the repofetch binary.
//!
//! These tests run the binary with `HOME` pointed at a temporary directory so
//! that the user's config and dotenv files are never read. None of them reach
//! a real provider API.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Isolated home directory for one invocation.
struct TestHome {
    dir: TempDir,
}

impl TestHome {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write_config(&self, contents: &str) {
        std::fs::write(self.path().join(".repofetch.yml"), contents).unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("repofetch").unwrap();
        cmd.env("HOME", self.path())
            .env_remove("REPOFETCH_CONFIG")
            .env_remove("GITHUB_TOKEN")
            .env_remove("GITLAB_TOKEN")
            .env_remove("BITBUCKET_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// A repository with a single `origin` remote.
fn repo_with_origin(url: &str) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let repo = git2::Repository::init(dir.path()).unwrap();
    repo.remote("origin", url).unwrap();
    dir
}

// =============================================================================
// Help and version
// =============================================================================

#[test]
fn version_flag() {
    TestHome::new()
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("repofetch "));
}

#[test]
fn help_lists_plugins_and_files() {
    let home = TestHome::new();
    home.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--github"))
        .stdout(predicate::str::contains("--gitlab"))
        .stdout(predicate::str::contains("Installed plugins:"))
        .stdout(predicate::str::contains("repofetch.env"));
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn first_run_writes_default_config() {
    let home = TestHome::new();
    home.command().arg("--help").assert().success();

    let written = std::fs::read_to_string(home.path().join(".repofetch.yml")).unwrap();
    assert!(written.contains("emojis: true"));
    assert!(written.contains("github"));
}

#[test]
fn explicit_missing_config_fails() {
    let home = TestHome::new();
    home.command()
        .args(["--config", "does-not-exist.yml", "--github", "--", "a/b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
    assert!(!home.path().join(".repofetch.yml").exists());
}

#[test]
fn config_limits_shortcut_flags() {
    let home = TestHome::new();
    home.write_config("plugins:\n  - gitlab\n");

    home.command()
        .arg("--github")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--github"));
}

#[test]
fn config_env_var_overrides_home() {
    let home = TestHome::new();
    let config = home.path().join("custom.yml");
    home.command()
        .env("REPOFETCH_CONFIG", &config)
        .arg("--help")
        .assert()
        .success();

    assert!(config.exists());
    assert!(!home.path().join(".repofetch.yml").exists());
}

// =============================================================================
// Plugin selection
// =============================================================================

#[test]
fn explicit_plugin_without_args_is_usage_error() {
    TestHome::new()
        .command()
        .arg("--github")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OWNER/REPOSITORY"));
}

#[test]
fn explicit_plugin_with_bad_args_is_usage_error() {
    TestHome::new()
        .command()
        .args(["--plugin", "github", "--", "a/b/c"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OWNER/REPOSITORY"));
}

#[test]
fn explicit_plugin_ignores_repository() {
    TestHome::new()
        .command()
        .args(["--repository", "/definitely/not/a/repo", "--bitbucket"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("WORKSPACE/REPOSITORY"))
        .stderr(predicate::str::contains("not a git repository").not());
}

#[test]
fn unknown_plugin_fails() {
    TestHome::new()
        .command()
        .args(["--plugin", "sourcehut"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown plugin: sourcehut"));
}

#[test]
fn not_a_repository_fails() {
    let dir = TempDir::new().unwrap();
    TestHome::new()
        .command()
        .args(["--repository"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn unsupported_remote_fails() {
    let repo = repo_with_origin("https://git.example.com/owner/repo.git");
    TestHome::new()
        .command()
        .arg("--path")
        .arg(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no plugin supports this repository"));
}

#[test]
fn detected_plugin_rejects_plugin_args() {
    let repo = repo_with_origin("https://github.com/octocat/hello-world.git");
    TestHome::new()
        .command()
        .arg("-r")
        .arg(repo.path())
        .args(["--", "octocat/hello-world"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("explicitly"));
}
