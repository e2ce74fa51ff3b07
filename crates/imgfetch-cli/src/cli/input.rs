//! Reading the URL line from stdin.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Please enter image URLs (comma-separated): ";

/// Prints the prompt and reads one line. End of input yields an empty line.
pub fn prompt_line(input: &mut impl BufRead, out: &mut impl Write) -> Result<String> {
    write!(out, "{}", PROMPT)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("read URLs from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
