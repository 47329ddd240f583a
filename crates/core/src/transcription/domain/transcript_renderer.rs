use std::fmt::Write;

use crate::transcription::domain::transcript::Transcript;

const RULE: &str = "============================================================";

/// Renders a transcript into the fixed plain-text layout:
/// a header naming the source file and language, the full text, and a
/// `[HH:MM:SS -> HH:MM:SS] text` line per segment.
///
/// Pure and deterministic: the same transcript and source name always
/// produce byte-identical output.
pub fn render(transcript: &Transcript, source_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Transcript of: {source_name}");
    let _ = writeln!(out, "Language: {}", transcript.language);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    out.push_str(transcript.text.trim());
    out.push_str("\n\n");
    let _ = writeln!(out, "{RULE}");
    out.push_str("Detailed segments:\n\n");
    for segment in &transcript.segments {
        let _ = writeln!(
            out,
            "[{} -> {}] {}",
            format_timestamp(segment.start_secs),
            format_timestamp(segment.end_secs),
            segment.text.trim()
        );
    }
    out
}

/// Format an offset in seconds as zero-padded `HH:MM:SS` (whole seconds).
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
