//! Client-supplied filenames are reduced to one safe path component before
//! they touch the filesystem.

const DEVICE_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Sanitize an uploaded filename.
///
/// Path separators become word breaks, whitespace runs collapse into `_`,
/// anything outside `[A-Za-z0-9_.-]` is dropped and leading/trailing dots and
/// underscores are trimmed. The result never contains a separator and is
/// never `.` or `..`; it may be empty, which callers must reject.
pub fn sanitize_filename(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .filter(char::is_ascii)
        .map(|ch| if ch == '/' || ch == '\\' { ' ' } else { ch })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|ch| ch == '.' || ch == '_');

    let stem = trimmed.split('.').next().unwrap_or_default();
    if DEVICE_NAMES
        .iter()
        .any(|device| device.eq_ignore_ascii_case(stem))
    {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    }
}
