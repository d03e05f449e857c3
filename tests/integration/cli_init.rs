use std::fs;

use predicates::prelude::*;

use crate::common::{CONFIG_FILE, TestEnv};

#[test]
fn help_exits_zero() {
    let env = TestEnv::new();

    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--init"))
        .stdout(predicate::str::contains("--no-increment-version"));
}

#[test]
fn init_creates_config() {
    let env = TestEnv::new();

    env.cmd()
        .arg("--init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created publish.config.toml"));

    let content = fs::read_to_string(env.root().join(CONFIG_FILE)).unwrap();
    assert!(content.contains("build_command"));
    assert!(content.contains("[filter]"));
}

#[test]
fn init_twice_fails_and_keeps_file() {
    let env = TestEnv::new();

    env.cmd().arg("--init").assert().success();
    fs::write(env.root().join(CONFIG_FILE), "build_command = \"make\"\n").unwrap();

    env.cmd()
        .arg("--init")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    let content = fs::read_to_string(env.root().join(CONFIG_FILE)).unwrap();
    assert_eq!(content, "build_command = \"make\"\n");
}

#[test]
fn run_without_config_fails_without_writing() {
    let env = TestEnv::new();

    env.cmd()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no configuration found"));

    assert_eq!(fs::read_dir(env.root()).unwrap().count(), 0);
}

#[test]
fn malformed_config_warns_and_fails() {
    let env = TestEnv::new();
    env.write_config("build_command = [oops");

    env.cmd()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to load configuration"))
        .stderr(predicate::str::contains("no configuration found"));
}

#[test]
fn init_then_default_config_runs() {
    let env = TestEnv::new();
    env.cmd().arg("--init").assert().success();
    env.write_sample_manifest();

    env.cmd()
        .args(["--build-command", "echo built"])
        .assert()
        .success();

    let published = env.published_manifest();
    assert_eq!(published["version"], "1.0.0");
}

#[test]
fn usage_errors_exit_one() {
    let env = TestEnv::new();

    env.cmd()
        .arg("--dry-run")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--dry-run"));

    env.cmd().arg("--build-command").assert().failure().code(1);
    env.cmd().args(["--init", "--clean"]).assert().failure().code(1);

    assert_eq!(fs::read_dir(env.root()).unwrap().count(), 0);
}

#[test]
fn version_exits_zero() {
    let env = TestEnv::new();

    env.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pkg-publish"));
}
