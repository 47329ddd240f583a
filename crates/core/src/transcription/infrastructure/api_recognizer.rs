use std::io::Cursor;
use std::time::Duration;

use crate::shared::constants::language_label;
use crate::transcription::domain::audio_segment::AudioSegment;
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::transcript::{Transcript, TranscriptSegment};

/// Hosted speech recognizer: an OpenAI-compatible `audio/transcriptions`
/// endpoint (OpenAI Whisper, OpenRouter, a self-hosted gateway).
///
/// PCM is re-encoded as 16-bit WAV and uploaded as multipart form data;
/// `response_format=verbose_json` supplies the text plus timestamped
/// segments. Configure via `STT_API_URL`, `STT_API_KEY`, and `STT_MODEL`.
pub struct ApiSpeechRecognizer {
    base_url: String,
    api_key: String,
    model: String,
    language: String,
    client: reqwest::blocking::Client,
}

impl ApiSpeechRecognizer {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        language: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            language: language.to_string(),
            client,
        })
    }

    /// Build from environment: `STT_API_URL` (default OpenAI), `STT_API_KEY`
    /// (required), `STT_MODEL` (default `whisper-1`).
    pub fn from_env(language: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let base_url = std::env::var("STT_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key =
            std::env::var("STT_API_KEY").map_err(|_| "STT_API_KEY not set for the api backend")?;
        let model = std::env::var("STT_MODEL").unwrap_or_else(|_| "whisper-1".to_string());
        Self::new(base_url, api_key, model, language)
    }

    fn encode_wav(audio: &AudioSegment) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: audio.sample_rate(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
            for &sample in audio.samples() {
                let clamped = (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
                writer.write_sample(clamped)?;
            }
            writer.finalize()?;
        }
        Ok(cursor.into_inner())
    }
}

impl SpeechRecognizer for ApiSpeechRecognizer {
    fn transcribe(&self, audio: &AudioSegment) -> Result<Transcript, Box<dyn std::error::Error>> {
        if audio.is_empty() {
            return Err("empty audio".into());
        }

        let wav = Self::encode_wav(audio)?;
        let url = format!(
            "{}/audio/transcriptions",
            self.base_url.trim_end_matches('/')
        );

        let part = reqwest::blocking::multipart::Part::bytes(wav)
            .file_name("audio.wav")
            .mime_str("audio/wav")?;
        let form = reqwest::blocking::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("response_format", "verbose_json");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(format!("STT API error {status}: {body}").into());
        }

        let json: serde_json::Value = response.json()?;
        let text = json
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .trim()
            .to_string();

        let segments = json
            .get("segments")
            .and_then(|s| s.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        let start_secs = item.get("start")?.as_f64()?;
                        let end_secs = item.get("end")?.as_f64()?;
                        let text = item.get("text")?.as_str()?.trim().to_string();
                        Some(TranscriptSegment {
                            start_secs,
                            end_secs,
                            text,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Transcript::new(
            text,
            language_label(&self.language).to_string(),
            segments,
        ))
    }
}
