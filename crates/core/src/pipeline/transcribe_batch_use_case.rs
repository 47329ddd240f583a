use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use crate::commit::domain::transcript_writer::TranscriptWriter;
use crate::commit::domain::version_control::{commit_message, VersionControl};
use crate::pipeline::run_logger::RunLogger;
use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::transcription::domain::audio_reader::AudioReader;
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::transcript_renderer;
use crate::watch::domain::audio_filter::is_supported_audio;

/// Why one file failed. Failures are isolated: the batch keeps going.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("transcription failed: {0}")]
    Transcription(String),
    #[error("write failed: {0}")]
    Write(String),
    #[error("commit failed: {0}")]
    Commit(String),
}

/// What happened to one file in a batch run.
#[derive(Debug)]
pub enum FileOutcome {
    /// Transcript written (and committed when version control is enabled).
    /// A rejected push is reported here rather than failing the file: the
    /// local write and commit stand.
    Transcribed {
        audio: PathBuf,
        transcript: PathBuf,
        push_error: Option<String>,
    },
    /// Unsupported extension: skipped, not an error.
    Skipped { audio: PathBuf },
    Failed { audio: PathBuf, error: FileError },
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn transcribed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Transcribed { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }

    /// Files needing operator attention: failed outright or committed with
    /// a rejected push.
    pub fn needs_attention(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| match o {
                FileOutcome::Failed { .. } => true,
                FileOutcome::Transcribed { push_error, .. } => push_error.is_some(),
                FileOutcome::Skipped { .. } => false,
            })
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.needs_attention() > 0
    }
}

/// Batch pipeline: decode → recognize → render → write → commit, one file
/// at a time, with per-file failure isolation.
pub struct TranscribeBatchUseCase {
    reader: Box<dyn AudioReader>,
    recognizer: Box<dyn SpeechRecognizer>,
    writer: Box<dyn TranscriptWriter>,
    vcs: Option<Box<dyn VersionControl>>,
    logger: Box<dyn RunLogger>,
}

impl TranscribeBatchUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        recognizer: Box<dyn SpeechRecognizer>,
        writer: Box<dyn TranscriptWriter>,
        vcs: Option<Box<dyn VersionControl>>,
        logger: Box<dyn RunLogger>,
    ) -> Self {
        Self {
            reader,
            recognizer,
            writer,
            vcs,
            logger,
        }
    }

    pub fn execute(&mut self, files: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();
        let total = files.len();

        for (index, audio_path) in files.iter().enumerate() {
            self.logger.progress(index + 1, total);

            if !is_supported_audio(audio_path) {
                self.logger
                    .info(&format!("skipping {} (unsupported)", audio_path.display()));
                report.outcomes.push(FileOutcome::Skipped {
                    audio: audio_path.clone(),
                });
                continue;
            }

            let started = Instant::now();
            let outcome = self.process_file(audio_path);
            self.logger.file_timing(
                &audio_path.display().to_string(),
                started.elapsed().as_secs_f64() * 1000.0,
            );

            match &outcome {
                FileOutcome::Transcribed {
                    transcript,
                    push_error,
                    ..
                } => {
                    self.logger
                        .info(&format!("transcript saved to {}", transcript.display()));
                    if let Some(err) = push_error {
                        log::warn!("push failed for {}: {err}", audio_path.display());
                    }
                }
                FileOutcome::Failed { error, .. } => {
                    log::error!("{}: {error}", audio_path.display());
                }
                FileOutcome::Skipped { .. } => {}
            }
            report.outcomes.push(outcome);
        }

        self.logger.summary();
        report
    }

    fn process_file(&self, audio_path: &Path) -> FileOutcome {
        let failed = |error: FileError| FileOutcome::Failed {
            audio: audio_path.to_path_buf(),
            error,
        };

        let audio = match self.reader.read_audio(audio_path, WHISPER_SAMPLE_RATE) {
            Ok(audio) => audio,
            Err(e) => return failed(FileError::Transcription(e.to_string())),
        };

        let transcript = match self.recognizer.transcribe(&audio) {
            Ok(t) => t,
            Err(e) => return failed(FileError::Transcription(e.to_string())),
        };

        let source_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| audio_path.display().to_string());
        let rendered = transcript_renderer::render(&transcript, &source_name);

        let transcript_path = match self.writer.write(audio_path, &rendered) {
            Ok(path) => path,
            Err(e) => return failed(FileError::Write(e.to_string())),
        };

        let mut push_error = None;
        if let Some(vcs) = &self.vcs {
            let message = commit_message(audio_path);
            match vcs.commit_file(&transcript_path, &message) {
                Ok(()) => {}
                Err(e) if e.is_push() => push_error = Some(e.to_string()),
                Err(e) => return failed(FileError::Commit(e.to_string())),
            }
        }

        FileOutcome::Transcribed {
            audio: audio_path.to_path_buf(),
            transcript: transcript_path,
            push_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::domain::version_control::VcsError;
    use crate::pipeline::run_logger::NullRunLogger;
    use crate::transcription::domain::audio_segment::AudioSegment;
    use crate::transcription::domain::transcript::{Transcript, TranscriptSegment};
    use std::sync::{Arc, Mutex};

    // ─── Stubs ───

    struct StubReader {
        fail_for: Option<String>,
    }

    impl AudioReader for StubReader {
        fn read_audio(
            &self,
            path: &Path,
            target_sample_rate: u32,
        ) -> Result<AudioSegment, Box<dyn std::error::Error>> {
            if let Some(needle) = &self.fail_for {
                if path.to_string_lossy().contains(needle.as_str()) {
                    return Err("corrupt audio".into());
                }
            }
            Ok(AudioSegment::new(vec![0.0; 1600], target_sample_rate))
        }
    }

    struct StubRecognizer;

    impl SpeechRecognizer for StubRecognizer {
        fn transcribe(
            &self,
            _: &AudioSegment,
        ) -> Result<Transcript, Box<dyn std::error::Error>> {
            Ok(Transcript::new(
                "你好".to_string(),
                "Cantonese".to_string(),
                vec![TranscriptSegment {
                    start_secs: 0.0,
                    end_secs: 3.0,
                    text: "你好".to_string(),
                }],
            ))
        }
    }

    struct StubWriter {
        written: Arc<Mutex<Vec<(PathBuf, String)>>>,
        fail: bool,
    }

    impl TranscriptWriter for StubWriter {
        fn write(
            &self,
            audio_path: &Path,
            rendered: &str,
        ) -> Result<PathBuf, Box<dyn std::error::Error>> {
            if self.fail {
                return Err("disk full".into());
            }
            let out = audio_path.with_extension("txt");
            self.written
                .lock()
                .unwrap()
                .push((out.clone(), rendered.to_string()));
            Ok(out)
        }
    }

    enum VcsBehavior {
        Ok,
        RejectPush,
        FailCommit,
    }

    struct StubVcs {
        behavior: VcsBehavior,
        committed: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl VersionControl for StubVcs {
        fn commit_file(&self, file: &Path, _message: &str) -> Result<(), VcsError> {
            match self.behavior {
                VcsBehavior::Ok => {
                    self.committed.lock().unwrap().push(file.to_path_buf());
                    Ok(())
                }
                VcsBehavior::RejectPush => {
                    self.committed.lock().unwrap().push(file.to_path_buf());
                    Err(VcsError::Push {
                        stderr: "auth failed".to_string(),
                    })
                }
                VcsBehavior::FailCommit => Err(VcsError::Failed {
                    op: "commit",
                    stderr: "bad state".to_string(),
                }),
            }
        }
    }

    fn use_case(
        reader: StubReader,
        writer: StubWriter,
        vcs: Option<StubVcs>,
    ) -> TranscribeBatchUseCase {
        TranscribeBatchUseCase::new(
            Box::new(reader),
            Box::new(StubRecognizer),
            Box::new(writer),
            vcs.map(|v| Box::new(v) as Box<dyn VersionControl>),
            Box::new(NullRunLogger),
        )
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_one_failure_does_not_stop_the_batch() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let committed = Arc::new(Mutex::new(Vec::new()));
        let mut uc = use_case(
            StubReader {
                fail_for: Some("broken".to_string()),
            },
            StubWriter {
                written: written.clone(),
                fail: false,
            },
            Some(StubVcs {
                behavior: VcsBehavior::Ok,
                committed: committed.clone(),
            }),
        );

        let report = uc.execute(&paths(&["a.mp3", "broken.mp3", "c.wav"]));

        assert_eq!(report.transcribed(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
        // The two good files were written and committed.
        assert_eq!(written.lock().unwrap().len(), 2);
        assert_eq!(committed.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_unsupported_extension_is_skipped_silently() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let mut uc = use_case(
            StubReader { fail_for: None },
            StubWriter {
                written: written.clone(),
                fail: false,
            },
            None,
        );

        let report = uc.execute(&paths(&["notes.txt", "talk.mp3"]));

        assert_eq!(report.skipped(), 1);
        assert_eq!(report.transcribed(), 1);
        assert!(!report.has_failures());
        assert_eq!(written.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_rendered_output_contains_segment_line() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let mut uc = use_case(
            StubReader { fail_for: None },
            StubWriter {
                written: written.clone(),
                fail: false,
            },
            None,
        );

        uc.execute(&paths(&["talk.mp3"]));

        let written = written.lock().unwrap();
        let (_, rendered) = &written[0];
        assert!(rendered.contains("Transcript of: talk.mp3"));
        assert!(rendered.contains("[00:00:00 -> 00:00:03] 你好"));
    }

    #[test]
    fn test_write_failure_fails_that_file() {
        let mut uc = use_case(
            StubReader { fail_for: None },
            StubWriter {
                written: Arc::new(Mutex::new(Vec::new())),
                fail: true,
            },
            None,
        );

        let report = uc.execute(&paths(&["talk.mp3"]));

        assert_eq!(report.failed(), 1);
        match &report.outcomes[0] {
            FileOutcome::Failed {
                error: FileError::Write(_),
                ..
            } => {}
            other => panic!("expected write failure, got {other:?}"),
        }
    }

    #[test]
    fn test_push_rejection_reports_but_keeps_transcript() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let committed = Arc::new(Mutex::new(Vec::new()));
        let mut uc = use_case(
            StubReader { fail_for: None },
            StubWriter {
                written: written.clone(),
                fail: false,
            },
            Some(StubVcs {
                behavior: VcsBehavior::RejectPush,
                committed: committed.clone(),
            }),
        );

        let report = uc.execute(&paths(&["talk.mp3"]));

        assert_eq!(report.transcribed(), 1);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.needs_attention(), 1, "rejected push needs attention");
        match &report.outcomes[0] {
            FileOutcome::Transcribed { push_error, .. } => {
                assert!(push_error.as_deref().unwrap().contains("auth failed"));
            }
            other => panic!("expected transcribed outcome, got {other:?}"),
        }
        // Local write happened and the commit was attempted.
        assert_eq!(written.lock().unwrap().len(), 1);
        assert_eq!(committed.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_commit_failure_fails_that_file() {
        let mut uc = use_case(
            StubReader { fail_for: None },
            StubWriter {
                written: Arc::new(Mutex::new(Vec::new())),
                fail: false,
            },
            Some(StubVcs {
                behavior: VcsBehavior::FailCommit,
                committed: Arc::new(Mutex::new(Vec::new())),
            }),
        );

        let report = uc.execute(&paths(&["talk.mp3"]));

        assert_eq!(report.failed(), 1);
        match &report.outcomes[0] {
            FileOutcome::Failed {
                error: FileError::Commit(_),
                ..
            } => {}
            other => panic!("expected commit failure, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_batch_is_a_clean_report() {
        let mut uc = use_case(
            StubReader { fail_for: None },
            StubWriter {
                written: Arc::new(Mutex::new(Vec::new())),
                fail: false,
            },
            None,
        );

        let report = uc.execute(&[]);
        assert!(report.outcomes.is_empty());
        assert!(!report.has_failures());
    }
}
