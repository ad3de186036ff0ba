//! End-to-end tests for the enumgen binary: exit codes, artifacts, report.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run enumgen inside `dir`, isolated from the caller's environment.
fn run_enumgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_enumgen"))
        .args(args)
        .current_dir(dir)
        .env_remove("ENUMGEN_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute enumgen: {}", e))
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("defs")).unwrap();
    dir
}

#[test]
fn test_help_lists_subcommands() {
    let dir = workspace();
    let output = run_enumgen(dir.path(), &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["generate", "check", "init", "targets"] {
        assert!(stdout.contains(command), "help is missing {}", command);
    }
}

#[test]
fn test_generate_success_exits_zero() {
    let dir = workspace();
    fs::write(
        dir.path().join("defs/colors.enumgen"),
        "enum Color {\n  Red,\n  Green,\n  Blue = 10,\n}\n",
    )
    .unwrap();

    let output = run_enumgen(
        dir.path(),
        &["generate", "defs", "--target", "go", "--out-dir", "out"],
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stderr(&output), "0 errors, 0 warnings\n");

    let generated = fs::read_to_string(dir.path().join("out/colors.go")).unwrap();
    assert!(generated.starts_with("// Code generated by enumgen from colors.enumgen. DO NOT EDIT.\n"));
    assert!(generated.contains("\tColorBlue  Color = 10\n"));
}

#[test]
fn test_errors_exit_one_with_report() {
    let dir = workspace();
    fs::write(
        dir.path().join("defs/mixed.enumgen"),
        "enum Bad { Ok = ; }\nenum Good { A }\n",
    )
    .unwrap();
    fs::write(dir.path().join("defs/empty.enumgen"), "").unwrap();

    let output = run_enumgen(dir.path(), &["generate", "defs"]);
    assert_eq!(output.status.code(), Some(1));

    let report = stderr(&output);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 3, "report: {}", report);
    assert!(lines[0].ends_with("empty.enumgen: warning: empty declaration file, skipped"));
    assert!(lines[1].ends_with("mixed.enumgen:1:17: error: expected integer, found `;`"));
    assert_eq!(lines[2], "1 error, 1 warning");
    assert!(dir.path().join("defs/mixed.rs").exists());
}

#[test]
fn test_empty_as_error() {
    let dir = workspace();
    fs::write(dir.path().join("defs/empty.enumgen"), "").unwrap();

    let output = run_enumgen(dir.path(), &["generate", "defs"]);
    assert_eq!(output.status.code(), Some(0));

    let output = run_enumgen(dir.path(), &["generate", "defs", "--empty-as-error"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_quiet_hides_warnings() {
    let dir = workspace();
    fs::write(dir.path().join("defs/empty.enumgen"), "").unwrap();

    let output = run_enumgen(dir.path(), &["-q", "generate", "defs"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stderr(&output), "0 errors, 1 warning\n");
}

#[test]
fn test_quiet_keeps_errors_and_summary() {
    let dir = workspace();
    fs::write(dir.path().join("defs/empty.enumgen"), "").unwrap();
    fs::write(dir.path().join("defs/bad.enumgen"), "enum Bad { Ok = ; }\n").unwrap();

    let output = run_enumgen(dir.path(), &["--quiet", "generate", "defs"]);
    assert_eq!(output.status.code(), Some(1));
    let report = stderr(&output);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 2, "report: {}", report);
    assert!(lines[0].ends_with("bad.enumgen:1:17: error: expected integer, found `;`"));
    assert_eq!(lines[1], "1 error, 1 warning");
}

#[test]
fn test_go_files_in_one_directory_share_a_package() {
    let dir = workspace();
    fs::write(dir.path().join("defs/colors.enumgen"), "enum Color { Red }\n").unwrap();
    fs::write(dir.path().join("defs/shapes.enumgen"), "enum Shape { Circle }\n").unwrap();

    let output = run_enumgen(dir.path(), &["generate", "defs", "-t", "go"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    for name in ["colors.go", "shapes.go"] {
        let generated = fs::read_to_string(dir.path().join("defs").join(name)).unwrap();
        assert!(generated.contains("\npackage defs\n"), "{}: {}", name, generated);
    }
}

#[test]
fn test_invalid_root_exits_two() {
    let dir = workspace();
    let output = run_enumgen(dir.path(), &["generate", "does-not-exist", "--out-dir", "out"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does-not-exist"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_malformed_config_exits_two() {
    let dir = workspace();
    fs::write(dir.path().join("enumgen.toml"), "[output]\ntarget = \"cobol\"\n").unwrap();
    let output = run_enumgen(dir.path(), &["check", "defs"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_config_file_sets_target() {
    let dir = workspace();
    fs::write(dir.path().join("enumgen.toml"), "[output]\ntarget = \"csharp\"\n").unwrap();
    fs::write(dir.path().join("defs/a.enumgen"), "enum A { X }").unwrap();

    let output = run_enumgen(dir.path(), &["generate", "defs"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(dir.path().join("defs/a.cs").exists());
}

#[test]
fn test_check_writes_nothing() {
    let dir = workspace();
    fs::write(dir.path().join("defs/a.enumgen"), "enum A { X, X }").unwrap();

    let output = run_enumgen(dir.path(), &["check", "defs"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("duplicate member `X` in enum `A`"));
    assert!(!dir.path().join("defs/a.rs").exists());
}

#[test]
fn test_init_refuses_overwrite() {
    let dir = workspace();
    let output = run_enumgen(dir.path(), &["init"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("enumgen.toml").exists());

    let output = run_enumgen(dir.path(), &["init"]);
    assert_eq!(output.status.code(), Some(1));

    let output = run_enumgen(dir.path(), &["init", "--force"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_targets_lists_extensions() {
    let dir = workspace();
    let output = run_enumgen(dir.path(), &["targets"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for ext in [".h", ".hpp", ".cs", ".go", ".py", ".rs", ".ts"] {
        assert!(stdout.contains(ext), "targets is missing {}", ext);
    }
}
