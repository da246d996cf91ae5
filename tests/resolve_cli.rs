//! End-to-end scenarios (§8) driven through the `crucible resolve` CLI
//! against YAML manifest fixtures, mirroring the teacher's
//! `assert_cmd`-based CLI integration tests.

mod support;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use support::crucible_command;

fn manifest_file(dir: &TempDir, name: &str, content: &str) -> assert_fs::fixture::ChildPath {
    let file = dir.child(name);
    file.write_str(content).unwrap();
    file
}

#[test]
fn scenario_1_simple_chain() {
    let dir = TempDir::new().unwrap();
    let manifest = manifest_file(
        &dir,
        "manifest.yaml",
        r#"
a:
  - version: "1.0-0"
    deps: ["b"]
b:
  - version: "1.0-0"
"#,
    );

    crucible_command()
        .args(["resolve", "a", "--manifest"])
        .arg(manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("b-1.0-0 a-1.0-0"));
}

#[test]
fn scenario_2_circular_dependency() {
    let dir = TempDir::new().unwrap();
    let manifest = manifest_file(
        &dir,
        "manifest.yaml",
        r#"
a:
  - version: "1.0"
    deps: ["b"]
b:
  - version: "1.0"
    deps: ["a"]
"#,
    );

    crucible_command()
        .args(["resolve", "a", "--manifest"])
        .arg(manifest.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("circular"));
}

#[test]
fn scenario_3_newest_candidate_wins() {
    let dir = TempDir::new().unwrap();
    let manifest = manifest_file(
        &dir,
        "manifest.yaml",
        r#"
a:
  - version: "1-0"
  - version: "2-0"
"#,
    );

    crucible_command()
        .args(["resolve", "a", "--manifest"])
        .arg(manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a-2-0"));
}

#[test]
fn scenario_5_platform_filtering() {
    let dir = TempDir::new().unwrap();
    let manifest = manifest_file(
        &dir,
        "manifest.yaml",
        r#"
a:
  - version: "1.0"
    platforms: ["win32"]
  - version: "1.0-0"
"#,
    );

    crucible_command()
        .args(["resolve", "a", "--manifest"])
        .arg(manifest.path())
        .args(["--platform", "unix", "--platform", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a-1.0-0"));
}

// The exact `_HEX` binary-hash-validation backtrack (§4.6, scenario 6 in
// §8) is exercised at the core-crate level with an injected verify_binary
// hook (crates/crucible-core/src/resolver.rs,
// test_scenario_binary_source_fallback) because the CLI always uses the
// real blake3-backed default hook, against which the spec's example hash
// literal does not verify. This CLI test instead exercises the same
// manifest-precedence machinery (§8 property 3) with two plain-source
// candidates at the same version, showing the earlier manifest wins.
#[test]
fn scenario_6_manifest_precedence_by_order() {
    let dir = TempDir::new().unwrap();
    let first_manifest = manifest_file(
        &dir,
        "first.yaml",
        r#"
a:
  - version: "1.0-0"
    deps: ["b"]
b:
  - version: "1.0-0"
"#,
    );
    let second_manifest = manifest_file(
        &dir,
        "second.yaml",
        r#"
a:
  - version: "1.0-0"
"#,
    );

    // First manifest's candidate (which needs b) wins when listed first.
    crucible_command()
        .args(["resolve", "a == 1.0-0", "--manifest"])
        .arg(first_manifest.path())
        .arg("--manifest")
        .arg(second_manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("b-1.0-0 a-1.0-0"));

    // Reversed order: second manifest's dep-free candidate wins instead.
    crucible_command()
        .args(["resolve", "a == 1.0-0", "--manifest"])
        .arg(second_manifest.path())
        .arg("--manifest")
        .arg(first_manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a-1.0-0").and(predicate::str::contains("b-1.0-0").not()));
}

#[test]
fn scenario_7_installed_mismatch() {
    let dir = TempDir::new().unwrap();
    let manifest = manifest_file(
        &dir,
        "manifest.yaml",
        r#"
b:
  - version: "1.0-0"
    deps: ["a >= 1.4-0"]
"#,
    );
    let installed = manifest_file(&dir, "installed.yaml", "a:\n  version: \"1.2-0\"\n");

    crucible_command()
        .args(["resolve", "b", "--manifest"])
        .arg(manifest.path())
        .arg("--installed")
        .arg(installed.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("but installed at version"));
}
