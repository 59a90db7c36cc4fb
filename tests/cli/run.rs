use std::env;

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Keep PATH so plugin commands resolve.
fn with_path(cmd: &mut std::process::Command) -> &mut std::process::Command {
    if let Some(path) = env::var_os("PATH") {
        cmd.env("PATH", path);
    }
    cmd
}

#[test]
fn test_clean_files_pass() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "export const answer = 42;\n")?;
    test.write_file("package.json", r#"{ "name": "app" }"#)?;

    let output = test.run_command(&["src/app.js", "package.json"]).output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Running pre-commit checks\n"), "{}", out);
    assert!(out.contains("Check for console.log calls"), "{}", out);
    assert!(out.ends_with("✓ All pre-commit checks passed\n"), "{}", out);

    Ok(())
}

#[test]
fn test_console_log_fails() -> Result<()> {
    let test = CliTest::with_file(
        "app.js",
        "function a() {\n  console.log('debug');\n  return 1;\n}\n",
    )?;

    let output = test.run_command(&["app.js"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("FAILED\n  app.js:2: console.log('debug');\n"), "{}", out);
    assert!(out.ends_with("✘ One or more pre-commit checks failed\n"), "{}", out);

    Ok(())
}

#[test]
fn test_trailing_whitespace_needs_attention() -> Result<()> {
    let test = CliTest::with_file("notes.md", "line with space \n")?;

    let output = test.run_command(&["notes.md"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("NEEDS ATTENTION\n  notes.md:1: line with space\n"), "{}", out);
    assert!(out.contains("SKIP_CHECKS=trailing_whitespace"), "{}", out);

    Ok(())
}

#[test]
fn test_allow_attention_exits_successfully() -> Result<()> {
    let test = CliTest::with_file("notes.md", "line with space \n")?;

    let output = test
        .run_command(&["notes.md"])
        .arg("--allow-attention")
        .output()?;

    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_allow_attention_does_not_hide_failures() -> Result<()> {
    let test = CliTest::with_file("broken.json", "{ \"a\": }")?;

    let output = test
        .run_command(&["broken.json"])
        .arg("--allow-attention")
        .output()?;

    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_skip_from_environment() -> Result<()> {
    let test = CliTest::with_file("notes.md", "line with space \n")?;

    let output = test
        .run_command(&["notes.md"])
        .env("SKIP_CHECKS", "trailing_whitespace")
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Skipping trailing_whitespace\n"), "{}", out);
    assert!(!out.contains("Check for trailing whitespace"), "{}", out);

    Ok(())
}

#[test]
fn test_skip_all_keeps_required_checks() -> Result<()> {
    let test = CliTest::with_file("data.json", "[1, 2,]")?;
    test.write_file(
        ".hookguard.json",
        r#"{ "checks": { "json_syntax": { "required": true } } }"#,
    )?;

    let output = test
        .run_command(&["data.json"])
        .args(["--skip", "all"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Skipping merge_conflict\n"), "{}", out);
    assert!(
        out.contains("warning: cannot skip json_syntax since it is required\n"),
        "{}",
        out
    );
    assert!(out.contains("FAILED\n  data.json: "), "{}", out);

    Ok(())
}

#[test]
fn test_disabled_check_does_not_run() -> Result<()> {
    let test = CliTest::with_file("app.ts", "console.log(1);\n")?;
    test.write_file(
        ".hookguard.json",
        r#"{ "checks": { "console_log": { "enabled": false } } }"#,
    )?;

    let output = test.run_command(&["app.ts"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).contains("console.log"));

    Ok(())
}

#[test]
fn test_quiet_check_hidden_when_good() -> Result<()> {
    let test = CliTest::with_file("ok.json", "{}")?;
    test.write_file(
        ".hookguard.json",
        r#"{ "checks": { "json_syntax": { "quiet": true } } }"#,
    )?;

    let output = test.run_command(&["ok.json"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).contains("Check JSON syntax"));

    Ok(())
}

#[test]
fn test_quiet_check_shown_when_failing() -> Result<()> {
    let test = CliTest::with_file("bad.json", "{")?;
    test.write_file(
        ".hookguard.json",
        r#"{ "checks": { "json_syntax": { "quiet": true } } }"#,
    )?;

    let output = test.run_command(&["bad.json"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Check JSON syntax...."));

    Ok(())
}

#[test]
fn test_restricted_path_needs_attention() -> Result<()> {
    let test = CliTest::with_file("vendor/lib/util.rb", "def util; end\n")?;

    let output = test.run_command(&["vendor/lib/util.rb"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("  changes staged under vendor\n"));

    Ok(())
}

#[test]
fn test_parent_dir_file_argument_still_hits_restricted_path() -> Result<()> {
    let test = CliTest::with_file("vendor/x.rb", "def x; end\n")?;
    test.write_file("app/main.rb", "def main; end\n")?;
    std::fs::create_dir(test.root().join(".git"))?;

    let output = test
        .run_command(&["../vendor/x.rb"])
        .current_dir(test.root().join("app"))
        .output()?;

    assert_eq!(output.status.code(), Some(1), "{}", stdout(&output));
    assert!(stdout(&output).contains("  changes staged under vendor\n"), "{}", stdout(&output));

    Ok(())
}

#[test]
fn test_pre_push_catalog() -> Result<()> {
    let test = CliTest::with_file("app.js", "console.log('push');\n")?;

    let output = test
        .run_command(&["app.js"])
        .args(["--hook", "pre-push"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.starts_with("Running pre-push checks\n"), "{}", out);
    assert!(!out.contains("console.log"), "{}", out);

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::with_file("app.js", "console.log('x');\n")?;

    let output = test
        .run_command(&["app.js"])
        .args(["--format", "json"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["hook"], "pre-commit");
    let console = report["results"]
        .as_array()
        .and_then(|r| r.iter().find(|c| c["name"] == "console_log"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(console["status"], "bad");
    assert_eq!(console["message"], "app.js:1: console.log('x');");

    Ok(())
}

#[test]
fn test_missing_plugin_program_warns() -> Result<()> {
    let test = CliTest::with_file("app.py", "x = 1\n")?;
    test.write_file(
        ".githooks/pre-commit/flake8.json",
        r#"{ "description": "Run flake8", "command": ["hookguard-missing-flake8"] }"#,
    )?;

    let output = test.run_command(&["app.py"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(
        out.contains("Run flake8") && out.contains("WARNING\n  hookguard-missing-flake8 not found\n"),
        "{}",
        out
    );
    assert!(out.ends_with("All pre-commit checks passed (1 warning)\n"), "{}", out);

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_plugin_overrides_builtin_in_place() -> Result<()> {
    let test = CliTest::with_file("notes.md", "line with space \n")?;
    test.write_file(
        ".githooks/pre-commit/whitespace.json",
        r#"{
            "name": "trailing_whitespace",
            "description": "Relaxed whitespace check",
            "command": ["sh", "-c", "exit 0"]
        }"#,
    )?;

    let output = with_path(&mut test.run_command(&["notes.md"])).output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    let out = stdout(&output);
    assert!(out.contains("Relaxed whitespace check"), "{}", out);
    assert!(!out.contains("Check for trailing whitespace"), "{}", out);
    let merge = out.find("Check for merge conflict markers").unwrap_or(usize::MAX);
    let relaxed = out.find("Relaxed whitespace check").unwrap_or(0);
    assert!(merge < relaxed, "override should keep the built-in position:\n{}", out);

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_plugin_failure_reports_output() -> Result<()> {
    let test = CliTest::with_file("a.txt", "hello\n")?;
    test.write_file(
        ".githooks/pre-commit/lint.json",
        r#"{
            "description": "Lint text",
            "command": ["sh", "-c", "echo \"lint: $0 is bad\"; exit 1"],
            "include": ["*.txt"]
        }"#,
    )?;

    let output = with_path(&mut test.run_command(&["a.txt"])).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("FAILED\n  lint: a.txt is bad\n"), "{}", stdout(&output));

    Ok(())
}

#[test]
fn test_broken_plugin_is_skipped_with_warning() -> Result<()> {
    let test = CliTest::with_file("app.js", "export {};\n")?;
    test.write_file(".githooks/pre-commit/broken.json", "{ nope")?;

    let output = test.run_command(&["app.js"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(
        out.starts_with(
            "warning: skipping check source .githooks/pre-commit/broken.json: failed to parse .githooks/pre-commit/broken.json:"
        ),
        "{}",
        out
    );
    assert!(out.ends_with("All pre-commit checks passed\n"), "{}", out);

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("app.js", "export {};\n")?;
    test.write_file(
        ".hookguard.json",
        r#"{ "checks": { "console_log": { "include": ["[oops"] } } }"#,
    )?;

    let output = test.run_command(&["app.js"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("Invalid glob pattern in 'checks.console_log.include'"),
        "{}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_outside_git_repository_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("run").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Not inside a git repository"));

    Ok(())
}

/// Run git in the test project; `false` if git is unavailable or fails.
fn git(test: &CliTest, args: &[&str]) -> bool {
    std::process::Command::new("git")
        .args(args)
        .current_dir(test.root())
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn test_pre_commit_sees_staged_content_and_restores_unstaged() -> Result<()> {
    let test = CliTest::with_file("app.js", "export const a = 1;\n")?;
    if !git(&test, &["init", "--quiet"]) {
        return Ok(());
    }
    assert!(git(&test, &["add", "app.js"]));
    let unstaged = "export const a = 1;\nconsole.log(a);\n";
    test.write_file("app.js", unstaged)?;

    let output = with_path(test.command().arg("run")).output()?;

    assert_eq!(
        output.status.code(),
        Some(0),
        "{}{}",
        stdout(&output),
        stderr(&output)
    );
    assert_eq!(test.read_file("app.js")?, unstaged);

    Ok(())
}

#[test]
fn test_pre_commit_blocks_staged_problem() -> Result<()> {
    let test = CliTest::with_file("app.js", "console.log('staged');\n")?;
    if !git(&test, &["init", "--quiet"]) {
        return Ok(());
    }
    assert!(git(&test, &["add", "app.js"]));
    let unstaged = "export const fixed = true;\n";
    test.write_file("app.js", unstaged)?;

    let output = with_path(test.command().arg("run")).output()?;

    assert_eq!(output.status.code(), Some(1), "{}", stdout(&output));
    assert!(stdout(&output).contains("app.js:1: console.log('staged');"));
    assert_eq!(test.read_file("app.js")?, unstaged);

    Ok(())
}
