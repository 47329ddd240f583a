use std::fs;
use std::path::{Path, PathBuf};

use crate::commit::domain::transcript_writer::TranscriptWriter;

/// Writes the transcript next to the source recording:
/// `voice-record/talk.mp3` → `voice-record/talk.txt`.
pub struct SidecarTextWriter;

impl TranscriptWriter for SidecarTextWriter {
    fn write(
        &self,
        audio_path: &Path,
        rendered: &str,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let out_path = audio_path.with_extension("txt");
        fs::write(&out_path, rendered)
            .map_err(|e| format!("failed to write {}: {e}", out_path.display()))?;
        Ok(out_path)
    }
}
