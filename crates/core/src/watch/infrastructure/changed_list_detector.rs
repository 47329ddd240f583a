use std::fs;
use std::path::PathBuf;

use crate::watch::domain::audio_filter::is_supported_audio;
use crate::watch::domain::change_detector::ChangeDetector;

/// Reads the newline-separated changed-file list a CI job writes from the
/// push diff. Blank lines are skipped; paths that no longer exist (deleted
/// in the same push) are dropped; non-audio paths are filtered out.
pub struct ChangedListDetector {
    list_path: PathBuf,
}

impl ChangedListDetector {
    pub fn new(list_path: impl Into<PathBuf>) -> Self {
        Self {
            list_path: list_path.into(),
        }
    }
}

impl ChangeDetector for ChangedListDetector {
    fn detect(&self) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(&self.list_path).map_err(|e| {
            format!(
                "failed to read change list {}: {e}",
                self.list_path.display()
            )
        })?;

        let files = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .filter(|p| is_supported_audio(p) && p.exists())
            .collect();

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn test_detect_filters_to_existing_audio() {
        let tmp = TempDir::new().unwrap();
        let kept = touch(&tmp, "a.mp3");
        touch(&tmp, "notes.txt");
        let missing = tmp.path().join("gone.wav");

        let list = tmp.path().join("changed_files.txt");
        fs::write(
            &list,
            format!(
                "{}\n{}\n{}\n\n   \n",
                kept.display(),
                tmp.path().join("notes.txt").display(),
                missing.display()
            ),
        )
        .unwrap();

        let detector = ChangedListDetector::new(&list);
        let files = detector.detect().unwrap();
        assert_eq!(files, vec![kept]);
    }

    #[test]
    fn test_detect_empty_list_yields_no_work() {
        let tmp = TempDir::new().unwrap();
        let list = tmp.path().join("changed_files.txt");
        fs::write(&list, "").unwrap();

        let detector = ChangedListDetector::new(&list);
        assert!(detector.detect().unwrap().is_empty());
    }

    #[test]
    fn test_detect_missing_list_is_error() {
        let detector = ChangedListDetector::new("/nonexistent/changed_files.txt");
        assert!(detector.detect().is_err());
    }
}
