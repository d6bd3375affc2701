//! Thin wrappers over the `git` binary.

use std::process::Command;

use crate::error::{Result, SuggestError};

/// True when the index differs from HEAD.
pub fn has_staged_changes(dir: &str) -> Result<bool> {
   // Exit code 0 = no staged changes, 1 = changes present
   let status = Command::new("git")
      .args(["diff", "--cached", "--quiet"])
      .current_dir(dir)
      .status()
      .map_err(|e| SuggestError::GitError(format!("Failed to run git diff --cached --quiet: {e}")))?;

   Ok(!status.success())
}

/// Raw staged diff, exactly as `git diff --cached` prints it.
pub fn get_staged_diff(dir: &str) -> Result<String> {
   if !has_staged_changes(dir)? {
      return Err(SuggestError::NoStagedChanges);
   }

   let output = Command::new("git")
      .args(["diff", "--cached"])
      .current_dir(dir)
      .output()
      .map_err(|e| SuggestError::GitError(format!("Failed to run git diff --cached: {e}")))?;

   if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(SuggestError::GitError(format!("git diff --cached failed: {stderr}")));
   }

   let diff = String::from_utf8_lossy(&output.stdout).trim().to_string();
   if diff.is_empty() {
      return Err(SuggestError::GitError("Staged diff came back empty".to_string()));
   }

   Ok(diff)
}

/// Current branch name; errors out on detached HEAD.
pub fn current_branch(dir: &str) -> Result<String> {
   let output = Command::new("git")
      .args(["rev-parse", "--abbrev-ref", "HEAD"])
      .current_dir(dir)
      .output()
      .map_err(|e| SuggestError::GitError(format!("Failed to run git rev-parse: {e}")))?;

   if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(SuggestError::GitError(format!("Could not resolve branch name: {stderr}")));
   }

   let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
   if branch.is_empty() {
      return Err(SuggestError::GitError("Branch name came back empty".to_string()));
   }
   if branch == "HEAD" {
      return Err(SuggestError::DetachedHead);
   }

   Ok(branch)
}

/// Run `git commit -m <message> [extra args]` attached to the terminal and
/// hand back its exit code.
pub fn commit(message: &str, extra_args: &[String], dir: &str) -> Result<i32> {
   if message.trim().is_empty() {
      return Err(SuggestError::GitError("Refusing to commit an empty message".to_string()));
   }

   let status = Command::new("git")
      .args(["commit", "-m", message])
      .args(extra_args)
      .current_dir(dir)
      .status()
      .map_err(|e| SuggestError::GitError(format!("Failed to run git commit: {e}")))?;

   Ok(status.code().unwrap_or(1))
}
