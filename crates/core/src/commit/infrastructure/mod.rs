pub mod git_version_control;
pub mod sidecar_writer;
