use std::fs;

use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn clean_missing_dir_succeeds() {
    let env = TestEnv::new();
    env.write_config("build_command = \"echo built\"\n");

    env.cmd()
        .arg("--clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to clean"));
}

#[test]
fn clean_removes_publish_dir() {
    let env = TestEnv::new();
    env.write_config("build_command = \"echo built\"\n");
    fs::create_dir_all(env.publish_path().join("nested")).unwrap();
    fs::write(env.publish_path().join("nested/file.js"), "x").unwrap();

    env.cmd()
        .arg("--clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed publish directory publish"));

    assert!(!env.publish_path().exists());
}

#[test]
fn clean_refuses_in_place_publishing() {
    let env = TestEnv::new();
    env.write_config("build_command = \"echo built\"\npublish_dir = \"\"\n");

    env.cmd()
        .arg("--clean")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("publishing in place"));

    assert!(env.root().join("publish.config.toml").exists());
}

#[test]
fn clean_without_config_fails() {
    let env = TestEnv::new();

    env.cmd()
        .arg("--clean")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no configuration found"));
}
