use regex::{Regex, RegexBuilder};
use tracing::warn;

const EN_SECTION_PATTERNS: &[&str] = &[
    r"Article\s+\d+[A-Za-z0-9\-\.]*",
    r"Section\s+\d+[A-Za-z0-9\-\.]*",
    r"Chapter\s+[IVXLC0-9]+",
    r"Title\s+[IVXLC0-9]+",
    r"§\s*\d+[A-Za-z0-9\-\.]*",
];

const NL_SECTION_PATTERNS: &[&str] = &[
    r"Art\.\s+\d+[A-Za-z0-9\-\.]*",
    r"HOOFDSTUK\s+[IVXLC0-9]+",
    r"AFDELING\s+[IVXLC0-9]+",
    r"TITEL\s+[IVXLC0-9]+",
    r"§\s*\d+[A-Za-z0-9\-\.]*",
];

// Supplied patterns are untrusted input; cap their length and the
// compiled program size so adversarial patterns cannot blow up matching.
const MAX_PATTERN_CHARS: usize = 512;
const COMPILED_SIZE_LIMIT: usize = 1 << 20;

/// Minimum number of matches a supplied pattern list must produce
/// against the full text before it is trusted for segmentation.
const MIN_SECTION_MATCHES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSource {
    Supplied,
    LanguageDefault,
    None,
}

impl PatternSource {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternSource::Supplied => "supplied",
            PatternSource::LanguageDefault => "language_default",
            PatternSource::None => "none",
        }
    }
}

#[derive(Debug)]
pub struct PatternSelection {
    pub regexes: Vec<Regex>,
    pub source: PatternSource,
    pub skipped: usize,
    pub fallback_applied: bool,
}

pub fn builtin_section_patterns(language_code: Option<&str>) -> &'static [&'static str] {
    match language_code {
        Some("en") => EN_SECTION_PATTERNS,
        Some("nl") => NL_SECTION_PATTERNS,
        _ => &[],
    }
}

/// A heading marker must begin a line, not appear mid-sentence. Patterns
/// that anchor themselves are used verbatim; everything else is wrapped
/// with the positional constraint.
fn anchor_pattern(raw: &str) -> String {
    if raw.starts_with('^') || raw.starts_with("(?m)^") {
        return raw.to_string();
    }

    format!(r"^\s*(?:{raw})")
}

/// Compiles marker patterns defensively: blank entries are ignored,
/// over-long or malformed entries are skipped individually and counted.
/// Returns the compiled regexes and the skip count.
pub fn compile_section_patterns(raw_patterns: &[&str]) -> (Vec<Regex>, usize) {
    let mut compiled = Vec::with_capacity(raw_patterns.len());
    let mut skipped = 0usize;

    for raw in raw_patterns {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.chars().count() > MAX_PATTERN_CHARS {
            warn!(pattern_chars = trimmed.chars().count(), "skipping over-long section pattern");
            skipped += 1;
            continue;
        }

        let anchored = anchor_pattern(trimmed);
        match RegexBuilder::new(&anchored)
            .multi_line(true)
            .case_insensitive(true)
            .size_limit(COMPILED_SIZE_LIMIT)
            .build()
        {
            Ok(regex) => compiled.push(regex),
            Err(error) => {
                warn!(pattern = trimmed, error = %error, "skipping malformed section pattern");
                skipped += 1;
            }
        }
    }

    (compiled, skipped)
}

/// Counts marker matches across all patterns, stopping as soon as the
/// validation threshold is reached.
pub fn count_section_matches(full_text: &str, regexes: &[Regex]) -> usize {
    if full_text.is_empty() {
        return 0;
    }

    let mut count = 0usize;
    for regex in regexes {
        for _ in regex.find_iter(full_text) {
            count += 1;
            if count >= MIN_SECTION_MATCHES {
                return count;
            }
        }
    }

    count
}

/// Chooses the marker set to segment with. A supplied list is an
/// untrusted hint: it is accepted only when it matches the actual text
/// at least twice, and otherwise falls back to the built-in table for
/// the language. A supplied empty list is an explicit request not to
/// segment. No supplied list means the built-in table decides.
pub fn select_section_patterns(
    full_text: &str,
    language_code: Option<&str>,
    supplied: Option<&[String]>,
) -> PatternSelection {
    if let Some(candidates) = supplied {
        if candidates.is_empty() {
            return PatternSelection {
                regexes: Vec::new(),
                source: PatternSource::None,
                skipped: 0,
                fallback_applied: false,
            };
        }

        let raw = candidates.iter().map(String::as_str).collect::<Vec<&str>>();
        let (compiled, skipped) = compile_section_patterns(&raw);
        if count_section_matches(full_text, &compiled) >= MIN_SECTION_MATCHES {
            return PatternSelection {
                regexes: compiled,
                source: PatternSource::Supplied,
                skipped,
                fallback_applied: false,
            };
        }

        warn!(
            supplied_patterns = candidates.len(),
            language_code = language_code.unwrap_or("none"),
            "supplied section patterns matched fewer than 2 times; using language defaults"
        );
        let defaults = builtin_section_patterns(language_code);
        let (compiled, default_skipped) = compile_section_patterns(defaults);
        let source = if compiled.is_empty() {
            PatternSource::None
        } else {
            PatternSource::LanguageDefault
        };
        return PatternSelection {
            regexes: compiled,
            source,
            skipped: skipped + default_skipped,
            fallback_applied: true,
        };
    }

    let defaults = builtin_section_patterns(language_code);
    let (compiled, skipped) = compile_section_patterns(defaults);
    let source = if compiled.is_empty() {
        PatternSource::None
    } else {
        PatternSource::LanguageDefault
    };

    PatternSelection {
        regexes: compiled,
        source,
        skipped,
        fallback_applied: false,
    }
}
