//! Extract the final `Content-Type` from collected response header lines.

/// Returns the `Content-Type` of the last response in `lines`.
///
/// With redirects, curl reports the headers of every hop; each status line
/// (`HTTP/...`) starts a new block, so only the final block is considered.
pub fn content_type(lines: &[String]) -> Option<String> {
    let mut current = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            current = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                current = Some(value.trim().to_string());
            }
        }
    }

    current
}
