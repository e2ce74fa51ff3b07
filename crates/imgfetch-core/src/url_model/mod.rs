//! URL modeling and filename derivation.
//!
//! Derives a safe local filename from the URL path, synthesizes one when the
//! path has none, and guarantees the result carries an extension.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::{sanitize_filename_for_linux, MAX_NAME_BYTES};

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix of names generated for URLs whose path has no filename.
pub const GENERATED_PREFIX: &str = "image";

/// Derives the filename an image from `url` is saved under.
///
/// Uses the last path segment, sanitized for Linux. When that is empty, a
/// name is generated from the current time (`image_<unix-millis>`). If the
/// result has no extension, `.{default_extension}` is appended.
///
/// # Examples
///
/// - `derive_filename("https://example.com/cat.jpg", "jpg")` → `"cat.jpg"`
/// - `derive_filename("https://example.com/photo", "jpg")` → `"photo.jpg"`
/// - `derive_filename("https://example.com/", "jpg")` → `"image_1700000000000.jpg"`
pub fn derive_filename(url: &str, default_extension: &str) -> String {
    derive_filename_with_token(url, default_extension, unix_millis())
}

/// Like `derive_filename` with an explicit uniqueness token for generated names.
pub fn derive_filename_with_token(url: &str, default_extension: &str, token: u128) -> String {
    let name = filename_from_url_path(url)
        .map(|raw| sanitize_filename_for_linux(&raw))
        .filter(|s| !s.is_empty() && s != "." && s != "..")
        .unwrap_or_else(|| format!("{}_{}", GENERATED_PREFIX, token));

    ensure_extension(name, default_extension)
}

/// Appends `.{default_extension}` when `name` has no (or an empty) extension.
pub fn ensure_extension(mut name: String, default_extension: &str) -> String {
    let has_extension = Path::new(&name)
        .extension()
        .is_some_and(|ext| !ext.is_empty());
    if !has_extension {
        let ext = default_extension.trim_start_matches('.');
        let ext = if ext.is_empty() { "jpg" } else { ext };
        name.push('.');
        name.push_str(ext);
    }
    name
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
