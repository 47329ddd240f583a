use std::path::PathBuf;
use std::process;

use clap::Parser;

use voicescribe_core::commit::domain::version_control::VersionControl;
use voicescribe_core::commit::infrastructure::git_version_control::GitVersionControl;
use voicescribe_core::commit::infrastructure::sidecar_writer::SidecarTextWriter;
use voicescribe_core::pipeline::run_logger::StdoutRunLogger;
use voicescribe_core::pipeline::transcribe_batch_use_case::{FileOutcome, TranscribeBatchUseCase};
use voicescribe_core::shared::constants::{
    DEFAULT_LANGUAGE, DEFAULT_WATCH_DIR, SUPPORTED_LANGUAGES, WHISPER_MODEL_NAME,
    WHISPER_MODEL_URL,
};
use voicescribe_core::shared::model_resolver;
use voicescribe_core::transcription::domain::speech_recognizer::SpeechRecognizer;
use voicescribe_core::transcription::infrastructure::api_recognizer::ApiSpeechRecognizer;
use voicescribe_core::transcription::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use voicescribe_core::transcription::infrastructure::whisper_recognizer::WhisperRecognizer;
use voicescribe_core::watch::domain::change_detector::ChangeDetector;
use voicescribe_core::watch::infrastructure::changed_list_detector::ChangedListDetector;
use voicescribe_core::watch::infrastructure::directory_scan_detector::DirectoryScanDetector;

/// Transcribe pushed voice recordings and commit the transcripts.
#[derive(Parser)]
#[command(name = "voicescribe")]
struct Cli {
    /// Directory scanned for recordings when no change list is given.
    #[arg(default_value = DEFAULT_WATCH_DIR)]
    watch_dir: PathBuf,

    /// Newline-separated list of changed files (written by CI from the push
    /// diff); overrides the directory scan.
    #[arg(long)]
    changed_files: Option<PathBuf>,

    /// Language hint: en, yue, or zh.
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Speech backend: whisper (local) or api (hosted).
    #[arg(long, default_value = "whisper")]
    backend: String,

    /// Whisper model path; downloaded to the cache when omitted.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Commit each transcript and push it to the remote.
    #[arg(long)]
    commit: bool,

    /// Commit without pushing (requires --commit).
    #[arg(long)]
    no_push: bool,

    /// Repository directory the commits run in.
    #[arg(long, default_value = ".")]
    repo_dir: PathBuf,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let detector: Box<dyn ChangeDetector> = match &cli.changed_files {
        Some(list) => Box::new(ChangedListDetector::new(list)),
        None => Box::new(DirectoryScanDetector::new(&cli.watch_dir)),
    };

    let files = detector.detect()?;
    if files.is_empty() {
        log::info!("No audio files to transcribe.");
        return Ok(());
    }
    log::info!("Found {} audio file(s) to transcribe", files.len());
    for file in &files {
        log::info!("  - {}", file.display());
    }

    let recognizer = build_recognizer(&cli)?;
    let vcs: Option<Box<dyn VersionControl>> = if cli.commit {
        let git = GitVersionControl::new(&cli.repo_dir);
        Some(Box::new(if cli.no_push {
            git.without_push()
        } else {
            git
        }))
    } else {
        None
    };

    let mut use_case = TranscribeBatchUseCase::new(
        Box::new(FfmpegAudioReader),
        recognizer,
        Box::new(SidecarTextWriter),
        vcs,
        Box::new(StdoutRunLogger::new()),
    );

    let report = use_case.execute(&files);
    log::info!(
        "Transcription complete: {}/{} file(s) succeeded",
        report.transcribed(),
        files.len()
    );

    if report.has_failures() {
        for outcome in &report.outcomes {
            match outcome {
                FileOutcome::Failed { audio, error } => {
                    eprintln!("{}: {error}", audio.display());
                }
                FileOutcome::Transcribed {
                    audio,
                    push_error: Some(err),
                    ..
                } => {
                    eprintln!("{}: push failed: {err}", audio.display());
                }
                _ => {}
            }
        }
        return Err(format!("{} file(s) need attention", report.needs_attention()).into());
    }

    Ok(())
}

fn build_recognizer(cli: &Cli) -> Result<Box<dyn SpeechRecognizer>, Box<dyn std::error::Error>> {
    match cli.backend.as_str() {
        "api" => Ok(Box::new(ApiSpeechRecognizer::from_env(&cli.language)?)),
        _ => {
            let model_path = match &cli.model {
                Some(path) => path.clone(),
                None => model_resolver::resolve(
                    WHISPER_MODEL_NAME,
                    WHISPER_MODEL_URL,
                    None,
                    Some(Box::new(download_progress)),
                )?,
            };
            eprintln!();
            Ok(Box::new(WhisperRecognizer::new(&model_path, &cli.language)?))
        }
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !SUPPORTED_LANGUAGES.contains(&cli.language.as_str()) {
        return Err(format!(
            "Language must be one of: {}, got '{}'",
            SUPPORTED_LANGUAGES.join(", "),
            cli.language
        )
        .into());
    }
    if cli.backend != "whisper" && cli.backend != "api" {
        return Err(format!("Backend must be 'whisper' or 'api', got '{}'", cli.backend).into());
    }
    if cli.no_push && !cli.commit {
        return Err("--no-push requires --commit".into());
    }
    if let Some(list) = &cli.changed_files {
        if !list.exists() {
            return Err(format!("Change list not found: {}", list.display()).into());
        }
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading speech model... {pct}%");
    } else {
        eprint!("\rDownloading speech model... {downloaded} bytes");
    }
}
