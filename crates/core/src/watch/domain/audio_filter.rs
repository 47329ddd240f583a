use std::path::Path;

use crate::shared::constants::AUDIO_EXTENSIONS;

/// True if the path carries one of the supported audio extensions
/// (case-insensitive). Paths without an extension never match.
pub fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
