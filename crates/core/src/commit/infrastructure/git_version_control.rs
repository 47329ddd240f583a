use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::commit::domain::version_control::{VcsError, VersionControl};

/// Commits transcripts with the `git` CLI: `add`, `commit`, `push`.
///
/// A failed push leaves the local commit in place; re-running over an
/// unchanged transcript ("nothing to commit") is not an error.
pub struct GitVersionControl {
    repo_dir: PathBuf,
    remote: String,
    push: bool,
}

impl GitVersionControl {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: "origin".to_string(),
            push: true,
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Disable pushing (commit only). Used by local runs without credentials.
    pub fn without_push(mut self) -> Self {
        self.push = false;
        self
    }

    fn run(&self, op: &'static str, args: &[&str]) -> Result<Output, VcsError> {
        Command::new("git")
            .current_dir(&self.repo_dir)
            .args(args)
            .output()
            .map_err(|source| VcsError::Spawn { op, source })
    }
}

impl VersionControl for GitVersionControl {
    fn commit_file(&self, file: &Path, message: &str) -> Result<(), VcsError> {
        let file_arg = file.to_string_lossy();

        let output = self.run("add", &["add", "--", &file_arg])?;
        if !output.status.success() {
            return Err(VcsError::Failed {
                op: "add",
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let output = self.run("commit", &["commit", "-m", message])?;
        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if stdout.contains("nothing to commit") {
                log::info!("nothing to commit for {}", file.display());
                return Ok(());
            }
            return Err(VcsError::Failed {
                op: "commit",
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if self.push {
            let output = self.run("push", &["push", &self.remote, "HEAD"])?;
            if !output.status.success() {
                return Err(VcsError::Push {
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn init_repo(dir: &Path) {
        for args in [
            vec!["init", "-q"],
            vec!["config", "user.email", "ci@example.com"],
            vec!["config", "user.name", "CI"],
        ] {
            let status = Command::new("git")
                .current_dir(dir)
                .args(&args)
                .status()
                .unwrap();
            assert!(status.success(), "git {args:?} failed");
        }
    }

    #[test]
    fn test_commit_creates_a_commit() {
        if !git_available() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        let file = tmp.path().join("talk.txt");
        fs::write(&file, "transcript").unwrap();

        let vcs = GitVersionControl::new(tmp.path()).without_push();
        vcs.commit_file(&file, "Add transcript for talk.mp3")
            .unwrap();

        let log = Command::new("git")
            .current_dir(tmp.path())
            .args(["log", "--oneline"])
            .output()
            .unwrap();
        let log = String::from_utf8_lossy(&log.stdout).to_string();
        assert!(log.contains("Add transcript for talk.mp3"), "log: {log}");
    }

    #[test]
    fn test_recommit_unchanged_file_is_ok() {
        if !git_available() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        let file = tmp.path().join("talk.txt");
        fs::write(&file, "transcript").unwrap();

        let vcs = GitVersionControl::new(tmp.path()).without_push();
        vcs.commit_file(&file, "Add transcript for talk.mp3")
            .unwrap();
        // Same content again: nothing to commit, but not an error.
        vcs.commit_file(&file, "Add transcript for talk.mp3")
            .unwrap();
    }

    #[test]
    fn test_push_to_local_bare_remote() {
        if !git_available() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        let remote_dir = tmp.path().join("remote.git");
        let work_dir = tmp.path().join("work");
        fs::create_dir_all(&remote_dir).unwrap();
        fs::create_dir_all(&work_dir).unwrap();

        let status = Command::new("git")
            .current_dir(&remote_dir)
            .args(["init", "-q", "--bare"])
            .status()
            .unwrap();
        assert!(status.success());

        init_repo(&work_dir);
        let status = Command::new("git")
            .current_dir(&work_dir)
            .args(["remote", "add", "origin", remote_dir.to_str().unwrap()])
            .status()
            .unwrap();
        assert!(status.success());

        let file = work_dir.join("talk.txt");
        fs::write(&file, "transcript").unwrap();

        let vcs = GitVersionControl::new(&work_dir);
        vcs.commit_file(&file, "Add transcript for talk.mp3")
            .unwrap();
    }

    #[test]
    fn test_push_without_remote_is_push_error() {
        if !git_available() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        let file = tmp.path().join("talk.txt");
        fs::write(&file, "transcript").unwrap();

        let vcs = GitVersionControl::new(tmp.path());
        let err = vcs
            .commit_file(&file, "Add transcript for talk.mp3")
            .unwrap_err();
        assert!(err.is_push(), "expected push error, got: {err}");
    }

    #[test]
    fn test_add_outside_repo_is_error() {
        if !git_available() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        // No git init: add must fail.
        let file = tmp.path().join("talk.txt");
        fs::write(&file, "transcript").unwrap();

        let vcs = GitVersionControl::new(tmp.path()).without_push();
        let err = vcs
            .commit_file(&file, "Add transcript for talk.mp3")
            .unwrap_err();
        assert!(!err.is_push());
    }
}
