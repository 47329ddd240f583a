pub mod run_logger;
pub mod transcribe_batch_use_case;
