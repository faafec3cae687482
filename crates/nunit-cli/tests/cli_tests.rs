//! End-to-end tests for the nunit-task binary

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Command isolated from the caller's environment and home directory
fn nunit_task(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nunit-task").unwrap();
    cmd.env_remove("NUNIT_TASK_FILE")
        .env_remove("NUNIT_TASK_LOG")
        .env_remove("NUNIT_TASK_JSON")
        .env_remove("NUNIT_TOOL_PATH")
        .env_remove("NUNIT_WORKING_DIRECTORY")
        .env_remove("NUNIT_FORCE_32BIT")
        .env("NO_COLOR", "1")
        .env("HOME", home.path());
    cmd
}

fn write_build_file(dir: &Path, tools: &Path) {
    let content = format!(
        r#"
default-target = "unit"

[defaults]
tool-path = "{}"

[targets.unit]
assemblies = ["A.dll", "B.dll"]
hide-dots = true
exclude-category = "Slow"

[targets.integration]
assemblies = ["Integration.Tests.dll"]
run-in-new-thread = false
timeout = 60000
"#,
        tools.display()
    );
    fs::write(dir.join("nunit.toml"), content).unwrap();
}

// ============================================================================
// Help
// ============================================================================

#[test]
#[serial]
fn test_help_shows_commands_and_examples() {
    let home = TempDir::new().unwrap();
    nunit_task(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("completions"))
        .stdout(predicate::str::contains("EXAMPLES"))
        .stdout(predicate::str::contains("NUNIT_TOOL_PATH"));
}

#[test]
#[serial]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    nunit_task(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nunit-task"));
}

// ============================================================================
// Show / check
// ============================================================================

#[cfg(unix)]
#[test]
#[serial]
fn test_show_prints_command_line() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    write_build_file(project.path(), tools.path());

    nunit_task(&home)
        .current_dir(project.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Target: unit"))
        .stdout(predicate::str::contains(
            "-nologo -nodots A.dll B.dll -exclude=Slow",
        ))
        .stdout(predicate::str::contains(
            tools.path().join("nunit-console").display().to_string(),
        ));
}

#[cfg(unix)]
#[test]
#[serial]
fn test_show_json_with_overrides() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    write_build_file(project.path(), tools.path());

    let output = nunit_task(&home)
        .arg("--file")
        .arg(project.path().join("nunit.toml"))
        .args(["show", "integration", "--json", "--x86", "--working-dir", "bin"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["target"], "integration");
    assert_eq!(value["platform"], "unix");
    assert_eq!(value["working_directory"], "bin");
    assert_eq!(
        value["program"],
        tools.path().join("nunit-console-x86").display().to_string()
    );
    assert_eq!(
        value["arguments"],
        serde_json::json!(["-nologo", "-nothread", "Integration.Tests.dll", "-timeout=60000"])
    );
    assert_eq!(value["errors"], serde_json::json!([]));
}

#[test]
#[serial]
fn test_show_unknown_target_fails() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    write_build_file(project.path(), tools.path());

    nunit_task(&home)
        .current_dir(project.path())
        .args(["show", "smoke"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target 'smoke' is not defined"));
}

#[test]
#[serial]
fn test_check_lists_targets() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    write_build_file(project.path(), tools.path());

    nunit_task(&home)
        .current_dir(project.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("integration (1 assembly)"))
        .stdout(predicate::str::contains("unit (2 assemblies) [default]"));
}

#[test]
#[serial]
fn test_check_rejects_unknown_process_model() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("nunit.toml"),
        r#"
[targets.unit]
assemblies = ["A.dll"]
process-model = "Threaded"
"#,
    )
    .unwrap();

    nunit_task(&home)
        .current_dir(project.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("process-model"))
        .stderr(predicate::str::contains("Threaded"));
}

#[test]
#[serial]
fn test_missing_build_file_fails() {
    let home = TempDir::new().unwrap();
    let empty = TempDir::new().unwrap();

    nunit_task(&home)
        .arg("--file")
        .arg(empty.path().join("nunit.toml"))
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load build file"));
}

// ============================================================================
// Run
// ============================================================================

#[cfg(unix)]
fn write_fake_console(dir: &Path, exit_code: i32) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("nunit-console");
    fs::write(
        &path,
        format!("#!/bin/sh\necho \"Tests run: 2 ($*)\"\nexit {}\n", exit_code),
    )
    .unwrap();
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).unwrap();
}

#[cfg(unix)]
#[test]
#[serial]
fn test_run_passing_console() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    write_build_file(project.path(), tools.path());
    write_fake_console(tools.path(), 0);

    nunit_task(&home)
        .current_dir(project.path())
        .arg("run")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Tests run: 2 (-nologo -nodots A.dll B.dll -exclude=Slow)",
        ))
        .stderr(predicate::str::contains("Passed target 'unit'"));
}

#[cfg(unix)]
#[test]
#[serial]
fn test_run_failing_console_exits_nonzero() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    write_build_file(project.path(), tools.path());
    write_fake_console(tools.path(), 3);

    nunit_task(&home)
        .current_dir(project.path())
        .arg("run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nunit-console exited with code 3."))
        .stderr(predicate::str::contains("Failed target 'unit'"));
}

#[cfg(unix)]
#[test]
#[serial]
fn test_run_missing_console_exits_nonzero() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    write_build_file(project.path(), tools.path());

    nunit_task(&home)
        .current_dir(project.path())
        .arg("run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to launch"));
}
