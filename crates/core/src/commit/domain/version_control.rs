use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("failed to run git {op}: {source}")]
    Spawn {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("git {op} failed: {stderr}")]
    Failed { op: &'static str, stderr: String },
    /// Push rejection is its own kind: the local commit stands, the failure
    /// is reported to the operator, and nothing is retried automatically.
    #[error("git push failed: {stderr}")]
    Push { stderr: String },
}

impl VcsError {
    pub fn is_push(&self) -> bool {
        matches!(self, VcsError::Push { .. })
    }
}

/// Domain interface for committing one transcript file back to the
/// repository. Each file's commit is independent; a failure for one file
/// never blocks the rest of the batch.
pub trait VersionControl: Send {
    fn commit_file(&self, file: &Path, message: &str) -> Result<(), VcsError>;
}

/// Commit message for one transcript, e.g.
/// `Add transcript for recording.mp3`.
pub fn commit_message(audio_path: &Path) -> String {
    let name = audio_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| audio_path.display().to_string());
    format!("Add transcript for {name}")
}
