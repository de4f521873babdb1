use std::path::Path;

/// Name used when nothing of the client filename survives sanitization
const FALLBACK_NAME: &str = "document";

/// Extension of every produced audio file
pub const AUDIO_EXTENSION: &str = "mp3";

/// Reduce a client-supplied filename to a safe, flat file name.
///
/// Only the last path component is kept and every character outside
/// `[A-Za-z0-9._-]` becomes `_`. Leading dots are stripped so the result can
/// never be hidden or climb out of its directory.
pub fn sanitize_file_name(raw: &str) -> String {
    let last_component = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let cleaned: String = last_component
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Derive the audio file name by replacing the final extension with `.mp3`
pub fn output_file_name(sanitized: &str) -> String {
    let stem = Path::new(sanitized)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_NAME);

    format!("{}.{}", stem, AUDIO_EXTENSION)
}
