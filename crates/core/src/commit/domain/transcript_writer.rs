use std::path::{Path, PathBuf};

/// Domain interface for persisting a rendered transcript.
///
/// The output path is derived from the audio path; re-processing the same
/// recording overwrites (supersedes) the previous transcript.
pub trait TranscriptWriter: Send {
    /// Write the rendered text and return the path it was written to.
    fn write(&self, audio_path: &Path, rendered: &str)
        -> Result<PathBuf, Box<dyn std::error::Error>>;
}
