pub mod transcript_writer;
pub mod version_control;
