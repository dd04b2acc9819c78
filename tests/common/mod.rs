use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub catalog: PathBuf,
    pub scratch: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let scratch = tmp.path().join("scratch");
        fs::create_dir_all(&scratch).expect("create scratch dir");

        let catalog = make_fixture_catalog(tmp.path());

        Self {
            _tmp: tmp,
            home,
            catalog,
            scratch,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rulekit");
        cmd.env("HOME", &self.home);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_catalog(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--catalog")
            .arg(self.catalog.to_str().expect("catalog path utf8"))
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

pub fn make_fixture_catalog(base: &Path) -> PathBuf {
    let catalog = base.join("catalog");
    let rules = catalog.join("rules");

    fs::create_dir_all(rules.join("typescript")).expect("create typescript category");
    fs::create_dir_all(rules.join("git")).expect("create git category");

    fs::write(
        rules.join("typescript/strict-types.mdc"),
        r#"---
description: Enforce strict TypeScript compiler options
globs:
  - "**/*.ts"
  - "**/*.tsx"
alwaysApply: false
---

# Strict types

Enable strict mode in tsconfig and avoid the any type.
"#,
    )
    .expect("write strict-types rule");

    fs::write(
        rules.join("git/commit-style.mdc"),
        r#"---
description: Conventional commit messages
alwaysApply: true
---

# Commit style

Prefix commits with feat, fix, docs, or chore.
"#,
    )
    .expect("write commit-style rule");

    catalog
}
