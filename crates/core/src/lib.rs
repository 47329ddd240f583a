//! Core library for voicescribe: detect changed voice recordings, transcribe
//! them with a speech-to-text backend, render plain-text transcripts, and
//! commit the results back to the repository.

pub mod commit;
pub mod pipeline;
pub mod shared;
pub mod transcription;
pub mod watch;
