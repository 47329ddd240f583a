use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;

use voicescribe_core::commit::domain::version_control::VersionControl;
use voicescribe_core::commit::infrastructure::git_version_control::GitVersionControl;
use voicescribe_core::commit::infrastructure::sidecar_writer::SidecarTextWriter;
use voicescribe_core::pipeline::run_logger::StdoutRunLogger;
use voicescribe_core::pipeline::transcribe_batch_use_case::TranscribeBatchUseCase;
use voicescribe_core::shared::constants::{WHISPER_MODEL_NAME, WHISPER_MODEL_URL};
use voicescribe_core::shared::model_resolver;
use voicescribe_core::transcription::domain::speech_recognizer::SpeechRecognizer;
use voicescribe_core::transcription::infrastructure::api_recognizer::ApiSpeechRecognizer;
use voicescribe_core::transcription::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use voicescribe_core::transcription::infrastructure::whisper_recognizer::WhisperRecognizer;
use voicescribe_core::watch::domain::audio_filter::is_supported_audio;

use crate::config::ServerConfig;

/// One transcription job as posted by the push webhook. Single-use command
/// object; nothing is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscribeRequest {
    pub repository_url: String,
    pub audio_files: Vec<String>,
    pub commit: String,
    pub pusher: String,
}

/// Counts reported after a job finishes (the webhook response is sent at
/// acceptance, so these only reach the server log).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub transcribed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Seam between the HTTP layer and the pipeline, so handlers can be tested
/// without decoding audio or touching git.
pub trait JobRunner: Send + Sync {
    fn run(&self, request: &TranscribeRequest) -> Result<RunSummary, String>;
}

/// Production runner: resolves the requested files against the repository
/// working tree and drives the batch use case.
pub struct PipelineJobRunner {
    config: ServerConfig,
}

impl PipelineJobRunner {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    fn build_recognizer(&self) -> Result<Box<dyn SpeechRecognizer>, String> {
        match self.config.backend.as_str() {
            "api" => ApiSpeechRecognizer::from_env(&self.config.language)
                .map(|r| Box::new(r) as Box<dyn SpeechRecognizer>)
                .map_err(|e| e.to_string()),
            _ => {
                let model_path = match &self.config.model_path {
                    Some(path) => path.clone(),
                    None => {
                        model_resolver::resolve(WHISPER_MODEL_NAME, WHISPER_MODEL_URL, None, None)
                            .map_err(|e| e.to_string())?
                    }
                };
                WhisperRecognizer::new(&model_path, &self.config.language)
                    .map(|r| Box::new(r) as Box<dyn SpeechRecognizer>)
                    .map_err(|e| e.to_string())
            }
        }
    }

    /// Resolve request paths against the repository directory, keeping only
    /// existing files with a supported extension. Anything else in the
    /// payload is ignored (the CI diff can name deleted or non-audio files).
    fn resolve_files(&self, request: &TranscribeRequest) -> Vec<PathBuf> {
        request
            .audio_files
            .iter()
            .map(|f| self.config.repo_dir.join(f))
            .filter(|p| is_supported_audio(p) && p.exists())
            .collect()
    }
}

impl JobRunner for PipelineJobRunner {
    fn run(&self, request: &TranscribeRequest) -> Result<RunSummary, String> {
        log::info!(
            "job from {} for commit {} ({} file(s), repo {})",
            request.pusher,
            request.commit,
            request.audio_files.len(),
            request.repository_url
        );

        let files = self.resolve_files(request);
        if files.is_empty() {
            return Ok(RunSummary {
                transcribed: 0,
                skipped: 0,
                failed: 0,
            });
        }

        let recognizer = self.build_recognizer()?;
        let vcs = GitVersionControl::new(&self.config.repo_dir);
        let vcs: Box<dyn VersionControl> = if self.config.push {
            Box::new(vcs)
        } else {
            Box::new(vcs.without_push())
        };

        let mut use_case = TranscribeBatchUseCase::new(
            Box::new(FfmpegAudioReader),
            recognizer,
            Box::new(SidecarTextWriter),
            Some(vcs),
            Box::new(StdoutRunLogger::new()),
        );

        let report = use_case.execute(&files);
        Ok(RunSummary {
            transcribed: report.transcribed(),
            skipped: report.skipped(),
            failed: report.failed(),
        })
    }
}

/// Single-job admission: the bridge is either `idle` or `processing`.
/// Acquisition is a compare-and-swap; the guard releases the slot when the
/// job finishes (or panics).
#[derive(Clone, Default)]
pub struct JobSlot(Arc<AtomicBool>);

impl JobSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<JobGuard> {
        if self
            .0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(JobGuard(Arc::clone(&self.0)))
        } else {
            None
        }
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct JobGuard(Arc<AtomicBool>);

impl Drop for JobGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
