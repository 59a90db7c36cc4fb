//! Thin wrappers around the `git` command line.

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result, bail};

fn git(root: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))
}

/// Run git and return stdout, failing on a non-zero exit.
fn git_stdout(root: &Path, args: &[&str]) -> Result<String> {
    let output = git(root, args)?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Split `-z` output. Paths come back unquoted, so non-ASCII names survive.
fn path_list(stdout: &str) -> Vec<PathBuf> {
    stdout
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Walk up from `start_dir` to the directory containing `.git`.
pub fn find_repo_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        if current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Files added, copied, modified or renamed in the index.
pub fn staged_files(root: &Path) -> Result<Vec<PathBuf>> {
    let out = git_stdout(
        root,
        &["diff", "--cached", "--name-only", "-z", "--diff-filter=ACMR"],
    )?;
    Ok(path_list(&out))
}

/// Files changed between the upstream branch and `HEAD`, or `None` when the
/// current branch has no upstream.
pub fn files_changed_since_upstream(root: &Path) -> Result<Option<Vec<PathBuf>>> {
    let upstream = git(root, &["rev-parse", "--abbrev-ref", "@{upstream}"])?;
    if !upstream.status.success() {
        return Ok(None);
    }
    let out = git_stdout(
        root,
        &[
            "diff",
            "--name-only",
            "-z",
            "--diff-filter=ACMR",
            "@{upstream}...HEAD",
        ],
    )?;
    Ok(Some(path_list(&out)))
}

pub fn tracked_files(root: &Path) -> Result<Vec<PathBuf>> {
    let out = git_stdout(root, &["ls-files", "-z"])?;
    Ok(path_list(&out))
}

/// Binary patch of unstaged modifications to tracked files.
pub fn unstaged_patch(root: &Path) -> Result<Vec<u8>> {
    let output = git(root, &["diff", "--binary", "--no-color", "--no-ext-diff"])?;
    if !output.status.success() {
        bail!(
            "git diff failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(output.stdout)
}

/// Reset the working tree of tracked files to the index.
pub fn checkout_index(root: &Path) -> Result<()> {
    git_stdout(root, &["checkout", "--quiet", "--", "."])?;
    Ok(())
}

pub fn apply_patch(root: &Path, patch: &Path) -> Result<()> {
    let patch = patch.to_string_lossy();
    git_stdout(root, &["apply", "--whitespace=nowarn", patch.as_ref()])?;
    Ok(())
}

pub fn merge_in_progress(root: &Path) -> Result<bool> {
    let out = git_stdout(root, &["rev-parse", "--git-path", "MERGE_HEAD"])?;
    let merge_head = root.join(out.trim());
    Ok(merge_head.exists())
}
