use tracing::info;

use crate::model::{Chunk, PageOffset, PipelineReport, Section};

mod normalize;
mod offsets;
mod patterns;
mod repeats;
mod sections;
mod splitter;
#[cfg(test)]
mod tests;

pub use normalize::{NoiseLineFilter, sample_text_from_pages};
pub use offsets::{PAGE_JOIN_SEPARATOR, build_page_offsets, map_chunk_to_pages};
pub use patterns::{
    PatternSelection, PatternSource, builtin_section_patterns, compile_section_patterns,
    count_section_matches, select_section_patterns,
};
pub use repeats::{RemovalOutcome, collect_repeating_lines, remove_repeating_lines};
pub use sections::{group_short_sections, split_into_sections};
pub use splitter::{chunk_sections, split_section_text};

#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// How many lines from the top/bottom of a page count as
    /// header/footer territory.
    pub edge_zone_lines: usize,
    /// How many subsequent pages each page is compared against when
    /// detecting repeated edge lines.
    pub lookahead_pages: usize,
    /// Similarity score (0-100) an edge line must reach against a
    /// lookahead page to count as repeated; 100 means exact match after
    /// case/whitespace normalization.
    pub similarity_threshold: u32,
    /// Sections shorter than this are merged into a neighbor before
    /// splitting.
    pub min_section_chars: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            edge_zone_lines: 5,
            lookahead_pages: 2,
            similarity_threshold: 100,
            min_section_chars: 200,
        }
    }
}

#[derive(Debug)]
pub struct SegmentedDocument {
    pub sections: Vec<Section>,
    pub page_offsets: Vec<PageOffset>,
    pub report: PipelineReport,
}

#[derive(Debug)]
pub struct ChunkOutcome {
    pub chunks: Vec<Chunk>,
    pub report: PipelineReport,
}

/// Strips repeated headers/footers and noise lines from raw pages and
/// normalizes each into paragraph text. One output string per input
/// page, in order.
pub fn clean_and_normalize_pages(
    pages: &[String],
    options: &ChunkOptions,
    report: &mut PipelineReport,
) -> Vec<String> {
    report.page_count = pages.len();

    let pages_lines = pages
        .iter()
        .map(|page| page.lines().collect::<Vec<&str>>())
        .collect::<Vec<Vec<&str>>>();

    let (header_candidates, footer_candidates) = collect_repeating_lines(
        &pages_lines,
        options.edge_zone_lines,
        options.lookahead_pages,
        options.similarity_threshold,
    );
    report.header_candidate_count = header_candidates.len();
    report.footer_candidate_count = footer_candidates.len();

    let removal = remove_repeating_lines(
        &pages_lines,
        &header_candidates,
        &footer_candidates,
        options.edge_zone_lines,
    );
    report.header_lines_removed = removal.header_lines_removed;
    report.footer_lines_removed = removal.footer_lines_removed;

    let filter = NoiseLineFilter::new();
    let mut normalized_pages = Vec::with_capacity(removal.pages.len());
    for page in &removal.pages {
        let (normalized, noise_lines) = filter.normalize_page(page);
        report.noise_lines_removed += noise_lines;
        normalized_pages.push(normalized);
    }

    report.empty_page_count = normalized_pages
        .iter()
        .filter(|page| page.trim().is_empty())
        .count();

    normalized_pages
}

/// Runs the pipeline through segmentation and grouping: clean pages,
/// build the page-offset index, validate/select marker patterns, cut
/// sections, merge short ones.
pub fn segment_document(
    pages: &[String],
    language_code: Option<&str>,
    section_patterns: Option<&[String]>,
    options: &ChunkOptions,
) -> SegmentedDocument {
    let mut report = PipelineReport::default();

    let normalized_pages = clean_and_normalize_pages(pages, options, &mut report);
    let full_text = normalized_pages.join(PAGE_JOIN_SEPARATOR);
    let page_offsets = build_page_offsets(&normalized_pages);

    let selection = select_section_patterns(&full_text, language_code, section_patterns);
    report.pattern_source = selection.source.as_str().to_string();
    report.patterns_skipped = selection.skipped;
    if selection.fallback_applied {
        let note = match selection.source {
            PatternSource::LanguageDefault => {
                "supplied section patterns matched fewer than 2 times; fell back to language defaults"
            }
            _ => {
                "supplied section patterns matched fewer than 2 times and no language defaults exist; treating document as a single section"
            }
        };
        report.warnings.push(note.to_string());
    }

    let sections = split_into_sections(&full_text, &selection.regexes);
    report.section_count = sections.len();

    let sections = group_short_sections(sections, options.min_section_chars);
    report.grouped_section_count = sections.len();

    info!(
        pages = report.page_count,
        pattern_source = %report.pattern_source,
        sections = report.section_count,
        grouped_sections = report.grouped_section_count,
        "segmented document"
    );

    SegmentedDocument {
        sections,
        page_offsets,
        report,
    }
}

/// Full pipeline: segmentation plus one independent splitting pass per
/// requested chunk size. Zero pages or all-blank pages yield an empty
/// chunk list, never an error.
pub fn run_pipeline(
    pages: &[String],
    chunk_sizes: &[usize],
    language_code: Option<&str>,
    section_patterns: Option<&[String]>,
    options: &ChunkOptions,
) -> ChunkOutcome {
    let mut document = segment_document(pages, language_code, section_patterns, options);

    let chunks = chunk_sections(
        &document.sections,
        chunk_sizes,
        &document.page_offsets,
        &mut document.report,
    );
    document.report.chunk_count = chunks.len();

    info!(chunks = document.report.chunk_count, "chunking completed");

    ChunkOutcome {
        chunks,
        report: document.report,
    }
}

/// Library entry point: pages in, chunk records out, with default
/// cleaning and grouping parameters.
pub fn segment_and_chunk(
    pages: &[String],
    chunk_sizes: &[usize],
    language_code: Option<&str>,
    section_patterns: Option<&[String]>,
) -> Vec<Chunk> {
    run_pipeline(
        pages,
        chunk_sizes,
        language_code,
        section_patterns,
        &ChunkOptions::default(),
    )
    .chunks
}
