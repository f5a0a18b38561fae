use anyhow::{Context, Result};
use tracing::info;

use crate::cli::SectionsArgs;
use crate::engine::{ChunkOptions, map_chunk_to_pages, segment_document};
use crate::model::SectionSummary;

const PREVIEW_CHARS: usize = 80;

/// Prints one summary row per grouped section, for inspecting how a
/// document segments before committing to a chunking run.
pub fn run(args: SectionsArgs) -> Result<()> {
    let pages = super::read_pages(&args.input)?;
    let section_patterns =
        super::load_section_patterns(&args.patterns, args.patterns_file.as_deref())?;

    let options = ChunkOptions {
        edge_zone_lines: args.edge_zone_lines,
        lookahead_pages: args.lookahead_pages,
        similarity_threshold: args.similarity_threshold,
        min_section_chars: args.min_section_chars,
    };

    let document = segment_document(
        &pages,
        args.language.as_deref(),
        section_patterns.as_deref(),
        &options,
    );

    let summaries = document
        .sections
        .iter()
        .enumerate()
        .map(|(section_index, section)| SectionSummary {
            section_index,
            start: section.start,
            end: section.end,
            char_count: section.text.chars().count(),
            pages: map_chunk_to_pages(section.start, section.end, &document.page_offsets),
            preview: preview_of(&section.text),
        })
        .collect::<Vec<SectionSummary>>();

    let rendered = serde_json::to_string_pretty(&summaries)
        .context("failed to serialize section summaries")?;
    println!("{rendered}");

    info!(
        sections = summaries.len(),
        pattern_source = %document.report.pattern_source,
        "section summary complete"
    );

    Ok(())
}

fn preview_of(text: &str) -> String {
    text.trim()
        .chars()
        .take(PREVIEW_CHARS)
        .collect::<String>()
        .replace('\n', " ")
}
