//! Batch driver: parse the URL list, then fetch each URL in order with one
//! shared duplicate set.

use crate::dedupe::SeenHashes;
use crate::error::{FetchError, FetchErrorKind, FetchOutcome};
use crate::fetcher::ImageFetcher;
use anyhow::{Context, Result};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Splits a comma-separated line into URLs, trimming each and dropping empty entries.
pub fn parse_url_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Creates the output directory (and parents) if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output directory {}", dir.display()))
}

/// What happened across one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Paths of saved images, in input order.
    pub saved: Vec<PathBuf>,
    pub not_image: usize,
    pub duplicates: usize,
    pub network_errors: usize,
    pub unexpected_errors: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            Ok(path) => self.saved.push(path.clone()),
            Err(e) => match e.kind() {
                FetchErrorKind::Network => self.network_errors += 1,
                FetchErrorKind::NotAnImage => self.not_image += 1,
                FetchErrorKind::Duplicate => self.duplicates += 1,
                FetchErrorKind::Unexpected => self.unexpected_errors += 1,
            },
        }
    }

    pub fn attempted(&self) -> usize {
        self.saved.len()
            + self.not_image
            + self.duplicates
            + self.network_errors
            + self.unexpected_errors
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Saved {} of {} URL(s): {} duplicate, {} not an image, {} connection error, {} other error",
            self.saved.len(),
            self.attempted(),
            self.duplicates,
            self.not_image,
            self.network_errors,
            self.unexpected_errors
        )
    }
}

/// Writes the human-readable status lines for one URL.
pub fn report_outcome(out: &mut impl Write, url: &str, outcome: &FetchOutcome) -> std::io::Result<()> {
    match outcome {
        Ok(path) => {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            writeln!(out, "Successfully fetched: {}", filename)?;
            writeln!(out, "Image saved to {}", path.display())
        }
        Err(FetchError::Network(e)) => writeln!(out, "Connection error for {}: {}", url, e),
        Err(FetchError::NotAnImage { content_type }) => writeln!(
            out,
            "Skipping: URL does not point to an image ({})",
            content_type
        ),
        Err(FetchError::Duplicate { filename, .. }) => {
            writeln!(out, "Duplicate skipped: ({})", filename)
        }
        Err(FetchError::Unexpected(e)) => writeln!(out, "An error occurred for {}: {:#}", url, e),
    }
}

/// Fetches every URL in order, sharing one duplicate set, and reports each outcome to `out`.
///
/// Per-URL failures are reported and counted, never returned; only a failed
/// write to `out` ends the batch early.
pub fn run_batch(fetcher: &ImageFetcher, urls: &[String], out: &mut impl Write) -> Result<BatchSummary> {
    let mut seen = SeenHashes::new();
    let mut summary = BatchSummary::default();

    tracing::info!(count = urls.len(), dir = %fetcher.output_dir().display(), "batch started");
    for url in urls {
        let outcome = fetcher.fetch_image(url, &mut seen);
        report_outcome(out, url, &outcome).context("write progress")?;
        summary.record(&outcome);
    }
    tracing::info!(
        saved = summary.saved.len(),
        duplicates = summary.duplicates,
        not_image = summary.not_image,
        network_errors = summary.network_errors,
        unexpected_errors = summary.unexpected_errors,
        "batch finished"
    );

    Ok(summary)
}
