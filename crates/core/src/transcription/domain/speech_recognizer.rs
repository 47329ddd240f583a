use crate::transcription::domain::audio_segment::AudioSegment;
use crate::transcription::domain::transcript::Transcript;

/// Domain interface for speech-to-text transcription.
///
/// Implementations carry their own language hint and produce the full text
/// plus timestamped segments for one recording. No retry or timeout policy
/// lives at this seam; a failed model invocation is simply an error.
pub trait SpeechRecognizer: Send {
    fn transcribe(&self, audio: &AudioSegment) -> Result<Transcript, Box<dyn std::error::Error>>;
}
