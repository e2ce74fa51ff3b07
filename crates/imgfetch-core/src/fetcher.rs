//! The per-URL pipeline: GET, check content type, name, hash, dedupe, write.

use crate::config::FetcherConfig;
use crate::dedupe::SeenHashes;
use crate::digest::content_digest;
use crate::error::{FetchError, FetchOutcome};
use crate::http::{self, HttpError, HttpOptions};
use crate::storage;
use crate::url_model::derive_filename;
use std::path::{Path, PathBuf};

/// Media type prefix a response must declare to be saved.
pub const IMAGE_TYPE_PREFIX: &str = "image/";

/// True if a declared `Content-Type` names an image type.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim_start()
        .get(..IMAGE_TYPE_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(IMAGE_TYPE_PREFIX))
}

/// Fetches images into one output directory.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    output_dir: PathBuf,
    http: HttpOptions,
    default_extension: String,
}

impl ImageFetcher {
    pub fn new(output_dir: impl Into<PathBuf>, http: HttpOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            http,
            default_extension: "jpg".to_string(),
        }
    }

    pub fn from_config(cfg: &FetcherConfig) -> Self {
        let http = HttpOptions {
            timeout: cfg.timeout(),
            user_agent: cfg.user_agent.clone(),
            max_redirects: cfg.max_redirects,
        };
        Self::new(&cfg.output_dir, http).with_default_extension(&cfg.default_extension)
    }

    pub fn with_default_extension(mut self, ext: &str) -> Self {
        self.default_extension = ext.trim_start_matches('.').to_string();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Fetches `url` and saves it unless it is not an image or its bytes are already in `seen`.
    ///
    /// On success the content digest has been added to `seen` and the saved
    /// path is returned. On any error `seen` is unchanged and no file is left behind.
    pub fn fetch_image(&self, url: &str, seen: &mut SeenHashes) -> FetchOutcome {
        let span = tracing::info_span!("fetch_image", url = %url);
        let _enter = span.enter();

        // The type is checked as soon as headers arrive, so a non-image body is never downloaded.
        let response = match http::get_accepting(url, &self.http, is_image_content_type) {
            Ok(r) => r,
            Err(HttpError::Rejected { content_type }) => {
                tracing::info!(%content_type, "not an image, aborted before body");
                return Err(FetchError::NotAnImage { content_type });
            }
            Err(e) => {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "request failed");
                return Err(e.into());
            }
        };
        tracing::debug!(
            status = response.status,
            bytes = response.body.len(),
            content_type = response.content_type.as_deref().unwrap_or(""),
            "response received"
        );

        let content_type = response.content_type.unwrap_or_default();
        if !is_image_content_type(&content_type) {
            tracing::info!(%content_type, "not an image, skipping");
            return Err(FetchError::NotAnImage { content_type });
        }

        let filename = derive_filename(url, &self.default_extension);
        let hash = content_digest(&response.body);

        if seen.contains(&hash) {
            tracing::info!(%filename, %hash, "duplicate content, skipping");
            return Err(FetchError::Duplicate { filename, hash });
        }
        seen.insert(hash.clone());

        match storage::save_image(&self.output_dir, &filename, &response.body) {
            Ok(path) => {
                tracing::info!(path = %path.display(), %hash, bytes = response.body.len(), "image saved");
                Ok(path)
            }
            Err(e) => {
                seen.remove(&hash);
                let error = format!("{:#}", e);
                tracing::error!(%error, %filename, "failed to save image");
                Err(FetchError::Unexpected(e))
            }
        }
    }
}
