use std::path::PathBuf;

/// Domain interface for enumerating the audio files a run should process.
///
/// Implementations source candidates from a CI changed-file list or from a
/// directory scan; both return only existing files with a supported audio
/// extension. An empty result is valid and simply yields no work.
pub trait ChangeDetector: Send {
    fn detect(&self) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>>;
}
