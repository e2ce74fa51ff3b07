//! Fetch images from URLs, drop anything that is not an image or was already
//! seen in this session, and store the rest in a local directory.

pub mod config;
pub mod logging;

pub mod batch;
pub mod dedupe;
pub mod digest;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod storage;
pub mod url_model;

pub use batch::{ensure_output_dir, parse_url_list, run_batch, BatchSummary};
pub use dedupe::SeenHashes;
pub use error::{FetchError, FetchErrorKind, FetchOutcome};
pub use fetcher::ImageFetcher;
