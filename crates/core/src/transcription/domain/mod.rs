pub mod audio_reader;
pub mod audio_segment;
pub mod speech_recognizer;
pub mod transcript;
pub mod transcript_renderer;
