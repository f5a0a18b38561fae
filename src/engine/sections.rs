use std::collections::BTreeSet;

use regex::Regex;

use crate::model::Section;

/// Cuts the full text into contiguous sections at every marker match.
/// Sections tile `[0, full_text.len())` exactly: offset 0 is forced to
/// be a boundary and the last section runs to the end of the text. With
/// no patterns or no matches the whole text is one section.
pub fn split_into_sections(full_text: &str, regexes: &[Regex]) -> Vec<Section> {
    if full_text.is_empty() {
        return Vec::new();
    }

    let whole = || {
        vec![Section {
            start: 0,
            end: full_text.len(),
            text: full_text.to_string(),
        }]
    };

    if regexes.is_empty() {
        return whole();
    }

    let mut boundaries = BTreeSet::new();
    for regex in regexes {
        for found in regex.find_iter(full_text) {
            boundaries.insert(found.start());
        }
    }

    if boundaries.is_empty() {
        return whole();
    }

    boundaries.insert(0);
    let ordered = boundaries.into_iter().collect::<Vec<usize>>();

    let mut sections = Vec::with_capacity(ordered.len());
    for (index, &start) in ordered.iter().enumerate() {
        let end = ordered
            .get(index + 1)
            .copied()
            .unwrap_or_else(|| full_text.len());
        sections.push(Section {
            start,
            end,
            text: full_text[start..end].to_string(),
        });
    }

    sections
}

/// Merges sections shorter than `min_chars` into the next section that
/// meets the threshold, so downstream splitting never sees degenerate
/// micro-sections. Short sections accumulate in a buffer that is folded
/// into the following qualifying section; a trailing buffer with no
/// qualifying section after it is emitted on its own. Empty-after-trim
/// sections are dropped; merged text is concatenated with a blank line
/// and offsets extended, so no content is lost and output stays ordered
/// and offset-contiguous.
pub fn group_short_sections(sections: Vec<Section>, min_chars: usize) -> Vec<Section> {
    let mut grouped = Vec::<Section>::with_capacity(sections.len());
    let mut buffer: Option<Section> = None;

    for section in sections {
        let trimmed = section.text.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.len() >= min_chars {
            match buffer.take() {
                Some(buffered) => grouped.push(Section {
                    start: buffered.start,
                    end: section.end,
                    text: format!("{}\n\n{}", buffered.text, trimmed),
                }),
                None => grouped.push(section),
            }
            continue;
        }

        match buffer.as_mut() {
            None => {
                buffer = Some(Section {
                    start: section.start,
                    end: section.end,
                    text: trimmed.to_string(),
                });
            }
            Some(buffered) => {
                buffered.text = format!("{}\n\n{}", buffered.text, trimmed);
                buffered.end = section.end;
            }
        }
    }

    if let Some(buffered) = buffer {
        grouped.push(buffered);
    }

    grouped
}
