//! End-to-end tests for the `metadelta` binary.
//!
//! Each test gets a scratch working directory with a definitions folder
//! populated from the fixture file, then runs the binary against it.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DEFINITIONS: &str = include_str!("fixtures/definitions.json");

// =============================================================================
// Test Fixtures
// =============================================================================

/// Scratch project with `definitions/a57.json` .. `a59.json`.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let definitions = dir.path().join("definitions");
        fs::create_dir(&definitions).expect("create definitions dir");
        for version in [57, 58, 59] {
            fs::write(definitions.join(format!("a{}.json", version)), DEFINITIONS)
                .expect("write definition file");
        }
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn definitions(&self) -> PathBuf {
        self.path().join("definitions")
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).expect("write file");
        path
    }

    /// The binary, isolated from the user's config and run inside the workspace.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("metadelta").expect("binary exists");
        cmd.env_remove("METADELTA_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--cwd")
            .arg(self.path())
            .arg("--definitions")
            .arg(self.definitions());
        cmd
    }
}

// =============================================================================
// versions
// =============================================================================

#[test]
fn versions_lists_discovered_and_latest_supported() {
    let ws = Workspace::new();
    fs::write(ws.definitions().join("notes.txt"), "ignored").unwrap();

    ws.cmd()
        .arg("versions")
        .assert()
        .success()
        .stdout(predicate::str::contains("versions: 57 58 59"))
        .stdout(predicate::str::contains("latest supported: 58"));
}

#[test]
fn versions_with_single_file_has_no_latest() {
    let ws = Workspace::new();
    fs::remove_file(ws.definitions().join("a57.json")).unwrap();
    fs::remove_file(ws.definitions().join("a58.json")).unwrap();

    ws.cmd()
        .arg("versions")
        .assert()
        .success()
        .stdout(predicate::str::contains("latest supported: none"));
}

#[test]
fn versions_fails_on_missing_directory() {
    let ws = Workspace::new();

    Command::cargo_bin("metadelta")
        .unwrap()
        .env_remove("METADELTA_CONFIG")
        .arg("--cwd")
        .arg(ws.path())
        .arg("--definitions")
        .arg(ws.path().join("nowhere"))
        .arg("versions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolve_prints_type_and_name() {
    let ws = Workspace::new();

    ws.cmd()
        .args([
            "resolve",
            "force-app/main/default/classes/Foo.cls",
            "force-app/main/default/objects/Account/fields/Name__c.field-meta.xml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "force-app/main/default/classes/Foo.cls\tApexClass\tFoo.cls",
        ))
        .stdout(predicate::str::contains(
            "\tCustomField\tobjectsAccountfieldsName__c.field-meta.xml",
        ));
}

#[test]
fn resolve_shared_folder_uses_directory_name() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["resolve", "force-app/main/default/moderation/Spam.rule-meta.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\tmoderation\tSpam.rule-meta.xml"));
}

#[test]
fn resolve_unknown_path_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .args([
            "resolve",
            "force-app/main/default/classes/Foo.cls",
            "README.md",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("README.md\t-"))
        .stdout(predicate::str::contains("\tApexClass\t"));
}

#[test]
fn resolve_requires_paths() {
    let ws = Workspace::new();
    ws.cmd().arg("resolve").assert().failure();
}

// =============================================================================
// filter
// =============================================================================

const DIFF: &str = "\
A      force-app/main/default/classes/Foo.cls
M      force-app/main/default/classes/debug.log
D      force-app/main/default/objects/Account/recordTypes/IT.recordType-meta.xml
D      force-app/main/default/triggers/Bar.trigger

!      force-app/main/default/classes/debug.log
";

#[test]
fn filter_without_patterns_drops_record_type_deletions() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("filter")
        .write_stdin(DIFF)
        .assert()
        .success()
        .stdout(predicate::str::contains("A      force-app/main/default/classes/Foo.cls"))
        .stdout(predicate::str::contains("D      force-app/main/default/triggers/Bar.trigger"))
        .stdout(predicate::str::contains("recordTypes").not());
}

#[test]
fn filter_applies_ignore_file() {
    let ws = Workspace::new();
    ws.write(".forceignore", "*.log\n");

    ws.cmd()
        .args(["filter", "--ignore", ".forceignore"])
        .write_stdin(DIFF)
        .assert()
        .success()
        .stdout(predicate::str::contains("M      force-app/main/default/classes/debug.log").not())
        .stdout(predicate::str::contains("!      force-app/main/default/classes/debug.log"))
        .stdout(predicate::str::contains("A      force-app/main/default/classes/Foo.cls"));
}

#[test]
fn filter_applies_include_file() {
    let ws = Workspace::new();
    ws.write(".forceinclude", "classes/\n");

    ws.cmd()
        .args(["filter", "--include", ".forceinclude"])
        .write_stdin(DIFF)
        .assert()
        .success()
        .stdout(predicate::str::contains("A      force-app/main/default/classes/Foo.cls"))
        .stdout(predicate::str::contains("M      force-app/main/default/classes/debug.log"))
        .stdout(predicate::str::contains("triggers/Bar.trigger"));
}

#[test]
fn filter_reads_patterns_from_config_file() {
    let ws = Workspace::new();
    ws.write(".forceignore", "classes/\n");
    ws.write(
        ".metadelta.toml",
        "[filter]\nignore = \".forceignore\"\n",
    );

    ws.cmd()
        .arg("filter")
        .write_stdin(DIFF)
        .assert()
        .success()
        .stdout(predicate::str::contains("A      force-app/main/default/classes/Foo.cls").not())
        .stdout(predicate::str::contains("D      force-app/main/default/triggers/Bar.trigger"));
}

#[test]
fn filter_missing_pattern_file_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["filter", "--ignore", "missing.ignore"])
        .write_stdin(DIFF)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.ignore"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn unknown_config_key_is_rejected() {
    let ws = Workspace::new();
    ws.write(".metadelta.toml", "[catalog]\nunknown = 1\n");

    ws.cmd()
        .arg("versions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn config_api_version_selects_definition_file() {
    let ws = Workspace::new();
    fs::write(ws.definitions().join("a57.json"), "[]").unwrap();
    ws.write(".metadelta.toml", "[catalog]\napi_version = 57\n");

    ws.cmd()
        .args(["resolve", "force-app/main/default/classes/Foo.cls"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\t-"));

    ws.cmd()
        .args([
            "--api-version",
            "59",
            "resolve",
            "force-app/main/default/classes/Foo.cls",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\tApexClass\t"));
}
