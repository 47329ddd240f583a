/// A time-bounded span of transcript text. Segments are ordered by start
/// time; the upstream model does not guarantee they never overlap.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptSegment {
    pub start_secs: f64,
    pub end_secs: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn duration(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// The result of transcribing one audio file. Created by a recognizer and
/// never mutated afterwards; re-processing the same file supersedes the
/// previous transcript rather than merging into it.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    /// Full text of the recording, as one block.
    pub text: String,
    /// Human-readable language label for the transcript header.
    pub language: String,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(text: String, language: String, segments: Vec<TranscriptSegment>) -> Self {
        Self {
            text,
            language,
            segments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.segments.is_empty()
    }
}
