use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub mod chunk;
pub mod sample;
pub mod sections;


/// Loads extracted page texts from disk. A `.json` file is parsed as an
/// array of page strings; anything else is treated as plain text with
/// form-feed page breaks, the layout pdftotext emits.
pub(crate) fn read_pages(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read input: {}", path.display()))?;

    if path.extension().and_then(|extension| extension.to_str()) == Some("json") {
        let pages: Vec<String> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse page array: {}", path.display()))?;
        return Ok(pages);
    }

    Ok(split_form_feed_pages(&raw))
}

/// Splits raw extracted text on form feeds and strips stray NUL bytes.
/// Trailing blank pages (a lone form feed at end of file produces one)
/// are dropped; interior blank pages are kept so page numbering stays
/// aligned with the source document.
pub(crate) fn split_form_feed_pages(raw: &str) -> Vec<String> {
    let mut pages = raw
        .split('\u{000C}')
        .map(|page| page.replace('\u{0000}', ""))
        .collect::<Vec<String>>();

    while pages
        .last()
        .is_some_and(|page| page.trim().is_empty())
    {
        pages.pop();
    }

    pages
}

/// Merges `--pattern` flags with a patterns file into the supplied
/// marker list. `None` means nothing was supplied and the built-in
/// language table decides; `Some(empty)` is an explicit request not to
/// segment, which only a given-but-empty patterns file can produce.
pub(crate) fn load_section_patterns(
    flag_patterns: &[String],
    patterns_file: Option<&Path>,
) -> Result<Option<Vec<String>>> {
    let mut merged = flag_patterns.to_vec();

    if let Some(path) = patterns_file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read patterns file: {}", path.display()))?;
        merged.extend(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
        return Ok(Some(merged));
    }

    if merged.is_empty() {
        Ok(None)
    } else {
        Ok(Some(merged))
    }
}
