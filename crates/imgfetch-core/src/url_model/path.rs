//! Filename extraction from URL path.

/// Returns the final path component of `url` (text after the last `/`).
///
/// Query and fragment are ignored. URLs without a scheme (which curl still
/// accepts) are treated as a bare path. Returns `None` if the path ends in `/`.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let segment = path.rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.to_string())
}
