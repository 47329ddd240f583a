use std::path::Path;

use crate::transcription::domain::audio_segment::AudioSegment;

/// Domain interface for decoding an audio file to mono PCM.
///
/// A file that cannot be opened, or that holds no decodable audio stream,
/// is an error; the pipeline reports it as a transcription failure for that
/// file and moves on.
pub trait AudioReader: Send {
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<AudioSegment, Box<dyn std::error::Error>>;
}
