//! `shorten` command: run the shortener over a single text.

use std::io::{self, Read};

use anyhow::{Context, Result};
use brewpress::config::BrewConfig;
use brewpress::debug;
use brewpress::utils::text::char_len;

/// Shorten `text` (or stdin) and print the result to stdout.
pub fn run_shorten(text: Option<&str>, limit: Option<usize>, config: &BrewConfig) -> Result<()> {
    let input = match text {
        Some(text) if text != "-" => text.to_string(),
        _ => read_stdin()?,
    };
    let limit = limit.unwrap_or(config.seo.description_limit);
    let shortener = config
        .seo
        .shortener()
        .context("invalid seo.extra_filler phrase")?;

    let output = shortener.shorten(&input, limit);
    debug!("shorten"; "{} -> {} chars (limit {})", char_len(&input), char_len(&output), limit);

    println!("{output}");
    Ok(())
}

/// Read all of stdin, dropping the trailing line break.
fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(strip_line_break(&buf).to_string())
}

fn strip_line_break(s: &str) -> &str {
    s.strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(s)
}
