use std::path::PathBuf;

use voicescribe_core::shared::constants::DEFAULT_LANGUAGE;

/// Server configuration, read from the environment (a `.env` file is
/// honored). The shared secret is optional; when unset, `/transcribe` is
/// open, which only suits loopback-only deployments.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind: String,
    pub secret: Option<String>,
    pub repo_dir: PathBuf,
    pub language: String,
    pub backend: String,
    pub model_path: Option<PathBuf>,
    pub push: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("VOICESCRIBE_SECRET")
            .ok()
            .filter(|s| !s.is_empty());
        Self {
            bind: std::env::var("VOICESCRIBE_BIND")
                .unwrap_or_else(|_| "127.0.0.1:8787".to_string()),
            secret,
            repo_dir: std::env::var("VOICESCRIBE_REPO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            language: std::env::var("VOICESCRIBE_LANGUAGE")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
            backend: std::env::var("VOICESCRIBE_BACKEND")
                .unwrap_or_else(|_| "whisper".to_string()),
            model_path: std::env::var("WHISPER_MODEL_PATH").ok().map(PathBuf::from),
            push: std::env::var("VOICESCRIBE_NO_PUSH").is_err(),
        }
    }
}
