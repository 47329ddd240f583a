use std::path::PathBuf;

use walkdir::WalkDir;

use crate::watch::domain::audio_filter::is_supported_audio;
use crate::watch::domain::change_detector::ChangeDetector;

/// Recursively scans the watched directory for audio files. Fallback source
/// when no changed-file list is available (e.g. a manual local run).
///
/// Results are sorted so repeated runs process files in a stable order.
pub struct DirectoryScanDetector {
    root: PathBuf,
}

impl DirectoryScanDetector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ChangeDetector for DirectoryScanDetector {
    fn detect(&self) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|p| is_supported_audio(p))
            .collect();
        files.sort();

        Ok(files)
    }
}
