use regex::{Regex, RegexBuilder};
use tracing::warn;

const NOISE_LINE_PATTERNS: &[&str] = &[
    r"^-{3,}$",
    r"Page\s+\d+\s+of\s+\d+",
    r"Pagina\s+\d+\s+van\s+\d+",
    r"Copyright",
    r"Belgisch Staatsblad",
];

/// Matches boilerplate lines that carry no content: horizontal rules,
/// page-number footers, copyright notices, gazette headers. Matching is
/// case-insensitive and unanchored unless the pattern anchors itself.
#[derive(Debug)]
pub struct NoiseLineFilter {
    patterns: Vec<Regex>,
}

impl NoiseLineFilter {
    pub fn new() -> Self {
        let patterns = NOISE_LINE_PATTERNS
            .iter()
            .filter_map(|pattern| {
                match RegexBuilder::new(pattern).case_insensitive(true).build() {
                    Ok(regex) => Some(regex),
                    Err(error) => {
                        warn!(pattern, error = %error, "skipping unusable noise line pattern");
                        None
                    }
                }
            })
            .collect();

        Self { patterns }
    }

    fn line_is_noise(&self, line: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(line))
    }

    /// Converts one page's line-based text into normalized paragraph
    /// text. Returns the normalized page and the number of noise lines
    /// dropped.
    pub fn normalize_page(&self, page: &str) -> (String, usize) {
        let mut normalized_lines = Vec::<String>::new();
        let mut noise_lines = 0usize;

        for line in page.lines() {
            let stripped = line.trim();
            if stripped.is_empty() {
                continue;
            }
            if self.line_is_noise(stripped) {
                noise_lines += 1;
                continue;
            }
            normalized_lines.push(stripped.split_whitespace().collect::<Vec<&str>>().join(" "));
        }

        (normalized_lines.join("\n"), noise_lines)
    }
}

impl Default for NoiseLineFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a bounded text sample from the leading pages, for handing to
/// an external language or section-pattern inference step. `max_chars`
/// counts characters, not bytes.
pub fn sample_text_from_pages(pages: &[String], max_chars: usize) -> String {
    let mut sample = String::new();
    let mut sample_chars = 0usize;

    for page in pages {
        let text = page.trim();
        if text.is_empty() {
            continue;
        }

        // The blank-line joiner spends budget too.
        let joiner_chars = if sample.is_empty() { 0 } else { 2 };
        let remaining = max_chars.saturating_sub(sample_chars + joiner_chars);
        if remaining == 0 {
            break;
        }

        if joiner_chars > 0 {
            sample.push_str("\n\n");
            sample_chars += joiner_chars;
        }
        for character in text.chars().take(remaining) {
            sample.push(character);
            sample_chars += 1;
        }
    }

    sample
}
