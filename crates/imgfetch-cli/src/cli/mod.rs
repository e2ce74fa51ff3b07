//! CLI for imgfetch.

mod input;

use anyhow::{Context, Result};
use clap::Parser;
use imgfetch::config::{self, FetcherConfig};
use imgfetch::{ensure_output_dir, parse_url_list, run_batch, ImageFetcher};
use std::io::{self, Write};
use std::path::PathBuf;

const WELCOME: &str = "Welcome to the Ubuntu Image Fetcher";
const TAGLINE: &str = "A tool for mindfully collecting images for the web";
const CLOSING: &str = "Connection strengthened. Community enriched.";

/// Download images from a comma-separated list of URLs, skipping non-images and duplicates.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "Fetch images from URLs into a local directory, skipping duplicates", long_about = None)]
pub struct Cli {
    /// Image URLs. Entries may also be comma-separated. If none are given, one line is read from stdin.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Directory to save images into (default from config: Fetched_Images).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Per-request timeout in seconds: connect timeout, and how long a transfer may stall
    /// before it is aborted (after a partial body the abort can lag by a few more seconds).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// User-Agent header sent with each request.
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, cfg: &mut FetcherConfig) {
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = secs;
        }
        if let Some(ua) = &self.user_agent {
            cfg.user_agent = ua.clone();
        }
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        cli.apply_overrides(&mut cfg);
        tracing::debug!("effective config: {:?}", cfg);

        let stdout = io::stdout();
        let mut out = stdout.lock();

        writeln!(out, "{}", WELCOME)?;
        writeln!(out, "{}\n", TAGLINE)?;

        ensure_output_dir(&cfg.output_dir)?;

        let line = if cli.urls.is_empty() {
            let stdin = io::stdin();
            input::prompt_line(&mut stdin.lock(), &mut out)?
        } else {
            cli.urls.join(",")
        };
        let urls = parse_url_list(&line);
        if urls.is_empty() {
            tracing::info!("no URLs given");
        }

        let fetcher = ImageFetcher::from_config(&cfg);
        let summary = run_batch(&fetcher, &urls, &mut out)?;

        writeln!(out, "\n{}", summary)?;
        writeln!(out, "\n{}", CLOSING).context("write stdout")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
