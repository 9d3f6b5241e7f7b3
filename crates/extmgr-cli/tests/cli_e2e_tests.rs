//! CLI end-to-end tests that invoke the compiled `extmgr` binary.
//!
//! Every test runs against a [`TestEnv`] so no real editor or user config is
//! touched. Tests that need an editor use the fake one from `TestEnv`, which
//! logs its arguments instead of installing anything.

use assert_cmd::Command;
use extmgr_test_utils::TestEnv;
use predicates::prelude::*;
use serde_json::Value;

/// `extmgr` pointed at the env's directories, with env fallbacks cleared.
fn extmgr(env: &TestEnv) -> Command {
    let mut cmd = Command::cargo_bin("extmgr").unwrap();
    for var in [
        "EXTMGR_CONFIG_DIR",
        "EXTMGR_WORKSPACE",
        "EXTMGR_EXTENSIONS_DIR",
        "EXTMGR_BUILTIN_DIR",
        "EXTMGR_CODE",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd.arg("--config-dir")
        .arg(env.config_dir())
        .arg("--workspace")
        .arg(env.workspace_dir())
        .arg("--extensions-dir")
        .arg(env.extensions().path());
    cmd
}

/// A python stack: a pack bundling python and debugpy, python needing pylance.
fn python_stack(env: &TestEnv) {
    let exts = env.extensions();
    exts.add("ms-python.vscode-pylance", "2024.1.0", &[], &[]);
    exts.add("ms-python.python", "2024.1.0", &["ms-python.vscode-pylance"], &[]);
    exts.add("ms-python.debugpy", "2024.1.0", &[], &[]);
    exts.add(
        "donjayamanne.python-extension-pack",
        "1.7.0",
        &[],
        &["ms-python.python", "ms-python.debugpy"],
    );
}

fn json_stdout(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_help_exits_zero() {
    Command::cargo_bin("extmgr")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("restore-default"))
        .stdout(predicate::str::contains("sync"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("extmgr")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("extmgr"));
}

#[test]
fn test_completions_bash() {
    Command::cargo_bin("extmgr")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("extmgr"));
}

#[test]
fn test_missing_extensions_dir_fails() {
    let env = TestEnv::new();
    std::fs::remove_dir_all(env.extensions().path()).unwrap();
    extmgr(&env)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("extensions directory not found"));
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_json_hides_protected() {
    let env = TestEnv::new();
    python_stack(&env);
    env.extensions()
        .add("joaomrsouza.extension-manager", "1.0.0", &[], &[]);

    let output = extmgr(&env).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json = json_stdout(&output);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "donjayamanne.python-extension-pack",
            "ms-python.debugpy",
            "ms-python.python",
            "ms-python.vscode-pylance",
        ]
    );
}

#[test]
fn test_list_all_includes_protected() {
    let env = TestEnv::new();
    env.extensions()
        .add("joaomrsouza.extension-manager", "1.0.0", &[], &[]);

    extmgr(&env)
        .args(["list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("joaomrsouza.extension-manager"))
        .stdout(predicate::str::contains("[protected]"));
}

#[test]
fn test_list_skips_obsolete_folders() {
    let env = TestEnv::new();
    let folder = env.extensions().add("old.ext", "1.0.0", &[], &[]);
    env.extensions().mark_obsolete(&folder);
    env.extensions().add("new.ext", "1.0.0", &[], &[]);

    extmgr(&env)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("new.ext"))
        .stdout(predicate::str::contains("old.ext").not());
}

// ============================================================================
// define / restore
// ============================================================================

#[test]
fn test_define_default_writes_profile() {
    let env = TestEnv::new();
    python_stack(&env);

    extmgr(&env)
        .args(["define-default", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 4 extension(s)"));

    let saved: toml::Value = toml::from_str(&env.read("config/extension-manager/profiles.toml")).unwrap();
    let default = saved["default"].as_array().unwrap();
    assert_eq!(default.len(), 4);
    assert!(default.iter().any(|v| v.as_str() == Some("ms-python.python")));
}

#[test]
fn test_define_workspace_writes_workspace_file() {
    let env = TestEnv::new();
    env.extensions().add("rust-lang.rust-analyzer", "0.3.0", &[], &[]);

    extmgr(&env)
        .args(["define-workspace", "--yes"])
        .assert()
        .success();

    let content = env.read("workspace/.vscode/extension-manager.toml");
    assert!(content.contains("rust-lang.rust-analyzer"));
}

#[test]
fn test_restore_default_requires_definition() {
    let env = TestEnv::new();
    python_stack(&env);

    extmgr(&env)
        .args(["restore-default", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has not been defined"));
}

#[test]
fn test_restore_default_up_to_date() {
    let env = TestEnv::new();
    env.extensions().add("a.ext", "1.0.0", &[], &[]);
    env.write_user_profiles("default = [\"A.Ext\"]\n");

    extmgr(&env)
        .args(["restore-default", "--yes", "--code", "definitely-not-an-editor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restore default: Already up to date."));
}

#[test]
fn test_restore_default_dry_run_prints_commands() {
    let env = TestEnv::new();
    python_stack(&env);
    env.write_user_profiles("default = [\"esbenp.prettier-vscode\"]\n");

    extmgr(&env)
        .args(["restore-default", "--dry-run", "--code", "code"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "code --uninstall-extension ms-python.debugpy --uninstall-extension ms-python.python \
             --uninstall-extension donjayamanne.python-extension-pack \
             --uninstall-extension ms-python.vscode-pylance",
        ))
        .stdout(predicate::str::contains("code --install-extension esbenp.prettier-vscode"))
        .stdout(predicate::str::contains("Dry run, nothing changed."));
}

#[cfg(unix)]
#[test]
fn test_restore_default_runs_editor_in_order() {
    let env = TestEnv::new();
    python_stack(&env);
    env.write_user_profiles("default = [\"esbenp.prettier-vscode\"]\n");
    let editor = env.fake_editor();

    extmgr(&env)
        .args(["restore-default", "--yes", "--code"])
        .arg(&editor)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restore default: Finished."))
        .stdout(predicate::str::contains("Reloading the editor is highly recommended"));

    let mut calls = env.editor_invocations();
    calls.sort();
    assert_eq!(
        calls,
        vec![
            "--install-extension esbenp.prettier-vscode".to_string(),
            "--uninstall-extension ms-python.debugpy --uninstall-extension ms-python.python \
             --uninstall-extension donjayamanne.python-extension-pack \
             --uninstall-extension ms-python.vscode-pylance"
                .to_string(),
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_restore_keeps_dependencies_of_wanted() {
    let env = TestEnv::new();
    python_stack(&env);
    env.write_user_profiles("default = [\"ms-python.python\"]\n");
    let editor = env.fake_editor();

    extmgr(&env)
        .args(["restore-default", "--yes", "--code"])
        .arg(&editor)
        .assert()
        .success();

    assert_eq!(
        env.editor_invocations(),
        vec![
            "--uninstall-extension ms-python.debugpy \
             --uninstall-extension donjayamanne.python-extension-pack"
                .to_string()
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_editor_failure_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let env = TestEnv::new();
    env.extensions().add("a.ext", "1.0.0", &[], &[]);
    env.write_user_profiles("default = []\n");

    let editor = env.root().join("broken-code");
    std::fs::write(&editor, "#!/bin/sh\nexit 3\n").unwrap();
    std::fs::set_permissions(&editor, std::fs::Permissions::from_mode(0o755)).unwrap();

    extmgr(&env)
        .args(["restore-default", "--yes", "--code"])
        .arg(&editor)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed with exit code 3"));
}

#[test]
fn test_cycle_reports_unresolved() {
    let env = TestEnv::new();
    env.extensions().add("a.ext", "1.0.0", &["b.ext"], &[]);
    env.extensions().add("b.ext", "1.0.0", &["a.ext"], &[]);
    env.write_user_profiles("default = []\n");

    extmgr(&env)
        .args(["restore-default", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unresolved"))
        .stderr(predicate::str::contains("a.ext, b.ext"));
}

// ============================================================================
// sync
// ============================================================================

#[test]
fn test_sync_merges_workspace_and_global() {
    let env = TestEnv::new();
    env.extensions().add("stale.ext", "1.0.0", &[], &[]);
    env.write_user_profiles("global = [\"eamodio.gitlens\"]\n");
    env.write_workspace_profiles("workspace = [\"rust-lang.rust-analyzer\"]\n");

    let output = extmgr(&env)
        .args(["plan", "sync", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_stdout(&output);
    assert_eq!(json["profile"], "sync");
    assert_eq!(
        json["plan"]["to_install"],
        serde_json::json!(["rust-lang.rust-analyzer", "eamodio.gitlens"])
    );
    assert_eq!(json["uninstall_order"]["ids"], serde_json::json!(["stale.ext"]));
}

#[test]
fn test_sync_without_profiles_fails() {
    let env = TestEnv::new();
    extmgr(&env)
        .args(["sync", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'sync' has not been defined"));
}

// ============================================================================
// env
// ============================================================================

#[test]
fn test_env_delete_without_environments() {
    let env = TestEnv::new();
    extmgr(&env)
        .args(["env", "delete", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No environments available."));
}

#[test]
fn test_env_create_list_delete() {
    let env = TestEnv::new();
    python_stack(&env);

    extmgr(&env)
        .args(["env", "create", "python", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Environment 'python' saved with 4 extension(s)"));

    let output = extmgr(&env).args(["env", "list", "--json"]).output().unwrap();
    let json = json_stdout(&output);
    assert_eq!(json[0]["name"], "python");
    assert_eq!(json[0]["extensions"].as_array().unwrap().len(), 4);

    extmgr(&env)
        .args(["env", "delete", "python", "--yes"])
        .assert()
        .success();

    extmgr(&env)
        .args(["env", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No environments available."));
}

#[test]
fn test_env_create_requires_name_with_yes() {
    let env = TestEnv::new();
    extmgr(&env)
        .args(["env", "create", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("environment name is required"));
}

#[test]
fn test_env_delete_unknown() {
    let env = TestEnv::new();
    env.write_user_profiles("[environments]\nweb = []\n");
    extmgr(&env)
        .args(["env", "delete", "nope", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[cfg(unix)]
#[test]
fn test_env_use_switches() {
    let env = TestEnv::new();
    env.extensions().add("a.ext", "1.0.0", &[], &[]);
    env.write_user_profiles("[environments]\nweb = [\"b.ext\"]\n");
    let editor = env.fake_editor();

    extmgr(&env)
        .args(["env", "use", "web", "--yes", "--code"])
        .arg(&editor)
        .assert()
        .success()
        .stdout(predicate::str::contains("Environment 'web': Finished."));

    let mut calls = env.editor_invocations();
    calls.sort();
    assert_eq!(
        calls,
        vec!["--install-extension b.ext", "--uninstall-extension a.ext"]
    );
}

// ============================================================================
// plan / resolve
// ============================================================================

#[test]
fn test_plan_unknown_profile() {
    let env = TestEnv::new();
    extmgr(&env)
        .args(["plan", "nonsense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown profile"));
}

#[test]
fn test_plan_environment_text() {
    let env = TestEnv::new();
    python_stack(&env);
    env.write_user_profiles("[environments]\nweb = [\"esbenp.prettier-vscode\"]\n");

    extmgr(&env)
        .args(["plan", "env:web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan for env:web"))
        .stdout(predicate::str::contains("esbenp.prettier-vscode"));
}

#[test]
fn test_resolve_json_orders_dependents_first() {
    let env = TestEnv::new();
    python_stack(&env);

    let output = extmgr(&env).args(["resolve", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json = json_stdout(&output);
    assert_eq!(json["complete"], true);
    let ids: Vec<&str> = json["ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    let pos = |id: &str| ids.iter().position(|x| *x == id).unwrap();
    assert!(pos("ms-python.python") < pos("ms-python.vscode-pylance"));
    assert!(pos("ms-python.python") < pos("donjayamanne.python-extension-pack"));
    assert!(pos("ms-python.debugpy") < pos("donjayamanne.python-extension-pack"));
}

#[test]
fn test_resolve_unknown_id() {
    let env = TestEnv::new();
    python_stack(&env);
    extmgr(&env)
        .args(["resolve", "not.installed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'not.installed' is not installed"));
}
