//! CLI parse tests.

use super::Cli;
use clap::Parser;
use imgfetch::config::FetcherConfig;
use std::path::{Path, PathBuf};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_args_reads_stdin() {
    let cli = parse(&["imgfetch"]);
    assert!(cli.urls.is_empty());
    assert!(cli.output_dir.is_none());
    assert!(cli.timeout.is_none());
    assert!(cli.user_agent.is_none());
}

#[test]
fn cli_parse_positional_urls() {
    let cli = parse(&[
        "imgfetch",
        "https://example.com/cat.jpg,https://example.com/dog.png",
        "https://example.com/bird.gif",
    ]);
    assert_eq!(cli.urls.len(), 2);
    assert_eq!(
        imgfetch::parse_url_list(&cli.urls.join(",")),
        vec![
            "https://example.com/cat.jpg".to_string(),
            "https://example.com/dog.png".to_string(),
            "https://example.com/bird.gif".to_string(),
        ]
    );
}

#[test]
fn cli_parse_flags() {
    let cli = parse(&[
        "imgfetch",
        "-o",
        "/tmp/pics",
        "--timeout",
        "12",
        "--user-agent",
        "curl/8",
    ]);
    assert_eq!(cli.output_dir.as_deref(), Some(Path::new("/tmp/pics")));
    assert_eq!(cli.timeout, Some(12));
    assert_eq!(cli.user_agent.as_deref(), Some("curl/8"));
}

#[test]
fn cli_rejects_bad_timeout() {
    assert!(Cli::try_parse_from(["imgfetch", "--timeout", "soon"]).is_err());
}

#[test]
fn overrides_replace_only_given_values() {
    let mut cfg = FetcherConfig::default();
    parse(&["imgfetch", "--output-dir", "out"]).apply_overrides(&mut cfg);
    assert_eq!(cfg.output_dir, PathBuf::from("out"));
    assert_eq!(cfg.timeout_secs, 5);
    assert_eq!(cfg.user_agent, "Mozilla/5.0");

    parse(&["imgfetch", "--timeout", "30"]).apply_overrides(&mut cfg);
    assert_eq!(cfg.output_dir, PathBuf::from("out"));
    assert_eq!(cfg.timeout_secs, 30);
}
