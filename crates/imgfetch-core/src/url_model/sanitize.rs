//! Linux-safe filename sanitization.

use crate::storage::TEMP_SUFFIX;
use std::path::Path;

/// Linux NAME_MAX, in bytes.
const NAME_MAX: usize = 255;

/// Longest name we produce: the temp file (`<name>.part`) must still fit in NAME_MAX.
pub const MAX_NAME_BYTES: usize = NAME_MAX - TEMP_SUFFIX.len();

fn is_forbidden(c: char) -> bool {
    c == '\0' || c == '/' || c == '\\' || c.is_control() || c == ' ' || c == '\t'
}

/// Sanitizes a candidate filename for safe use on Linux.
///
/// - Replaces NUL, `/`, `\`, whitespace and control characters with `_`
/// - Collapses runs of `_`
/// - Trims leading/trailing dots, spaces and underscores
/// - Limits length to `MAX_NAME_BYTES` (255 minus room for `.part`), keeping
///   the extension when the stem is cut
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if is_forbidden(c) { '_' } else { c };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    truncate_keeping_extension(trimmed, MAX_NAME_BYTES)
}

fn truncate_keeping_extension(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }

    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.len() + 1 < max)
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let mut take = max - ext.len();
    while take > 0 && !name.is_char_boundary(take) {
        take -= 1;
    }
    format!("{}{}", &name[..take], ext)
}
