/// Extensions the watcher treats as voice recordings (lowercase, no dot).
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg"];

/// Directory scanned for recordings when no changed-file list is supplied.
pub const DEFAULT_WATCH_DIR: &str = "voice-record";

pub const WHISPER_MODEL_NAME: &str = "ggml-base.bin";
pub const WHISPER_MODEL_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin";

/// Whisper expects 16 kHz mono input.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Language hints accepted by the pipeline, as passed to the model.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "yue", "zh"];

pub const DEFAULT_LANGUAGE: &str = "yue";

/// Human-readable label for a language hint, used in the transcript header.
pub fn language_label(hint: &str) -> &'static str {
    match hint {
        "en" => "English",
        "yue" => "Cantonese",
        "zh" => "Mandarin",
        _ => "Unknown",
    }
}
