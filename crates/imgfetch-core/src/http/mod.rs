//! Single-stream HTTP GET via libcurl.
//!
//! The body is streamed through the write callback into memory; response
//! header lines are collected so the final `Content-Type` can be checked
//! before the first body byte is kept.

mod parse;

pub use parse::content_type;

use std::cell::RefCell;
use std::str;
use std::time::Duration;
use thiserror::Error;

/// Failure of a GET: curl could not complete the transfer, the final status
/// was not 2xx, or the declared content type was refused before the body was read.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error(transparent)]
    Curl(#[from] curl::Error),
    #[error("HTTP {0}")]
    Status(u32),
    #[error("content type not accepted ({content_type})")]
    Rejected { content_type: String },
}

impl HttpError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::Curl(e) if e.is_operation_timedout())
    }
}

#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Connect timeout, and the stall window: the transfer is aborted once it
    /// stops receiving data for about this long. curl averages speed over a
    /// window of a few seconds, so after a partial body the abort can come up
    /// to ~5 s later than `timeout`.
    pub timeout: Duration,
    pub user_agent: String,
    pub max_redirects: u32,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            user_agent: "Mozilla/5.0".to_string(),
            max_redirects: 10,
        }
    }
}

/// A completed 2xx response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    /// `Content-Type` of the final response, if the server sent one.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Performs a GET and returns the full body.
///
/// Follows redirects up to `opts.max_redirects`. Runs in the current thread.
pub fn get(url: &str, opts: &HttpOptions) -> Result<HttpResponse, HttpError> {
    get_accepting(url, opts, |_| true)
}

/// Like `get`, but hands the final response's `Content-Type` (empty if absent)
/// to `accept` before the first body byte is stored. If `accept` refuses it,
/// the transfer is aborted and `HttpError::Rejected` returned, unless the
/// status was not 2xx, which is still reported as `HttpError::Status`.
///
/// Responses with an empty body never reach the check; callers that care
/// should inspect `HttpResponse::content_type` as well.
pub fn get_accepting<F>(url: &str, opts: &HttpOptions, accept: F) -> Result<HttpResponse, HttpError>
where
    F: Fn(&str) -> bool,
{
    let headers: RefCell<Vec<String>> = RefCell::new(Vec::new());
    let mut body: Vec<u8> = Vec::new();
    let mut checked = false;
    let mut rejected: Option<String> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirects)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.timeout)?;
    // Abort once nothing has arrived for `timeout` (a read timeout, not a cap on total time).
    easy.low_speed_limit(1)?;
    easy.low_speed_time(opts.timeout)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.borrow_mut().push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            // Redirect bodies are not delivered here, so the header block is the final one.
            if !checked {
                checked = true;
                let ct = content_type(&headers.borrow()).unwrap_or_default();
                if !accept(&ct) {
                    rejected = Some(ct);
                    return Ok(0);
                }
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()
    };

    let status = easy.response_code()?;
    if let Some(content_type) = rejected {
        if !(200..300).contains(&status) {
            return Err(HttpError::Status(status));
        }
        return Err(HttpError::Rejected { content_type });
    }
    performed?;

    if !(200..300).contains(&status) {
        return Err(HttpError::Status(status));
    }

    let final_type = content_type(&headers.borrow());
    Ok(HttpResponse {
        status,
        content_type: final_type,
        body,
    })
}
