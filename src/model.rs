use serde::{Deserialize, Serialize};

/// Half-open byte range one normalized page occupies inside the joined
/// document text. Pages are 1-based; ranges are contiguous and strictly
/// increasing, separated by the fixed 2-byte page join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOffset {
    pub page: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_size: usize,
    pub chunk_index: usize,
    pub text: String,
    pub pages: Vec<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub page_count: usize,
    pub empty_page_count: usize,
    pub header_candidate_count: usize,
    pub footer_candidate_count: usize,
    pub header_lines_removed: usize,
    pub footer_lines_removed: usize,
    pub noise_lines_removed: usize,
    pub pattern_source: String,
    pub patterns_skipped: usize,
    pub section_count: usize,
    pub grouped_section_count: usize,
    pub chunk_count: usize,
    pub chunks_by_size: Vec<ChunkSizeCount>,
    pub offset_fallback_count: usize,
    pub offset_best_effort_count: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkSizeCount {
    pub chunk_size: usize,
    pub chunk_count: usize,
}

/// One row of `sections` command output: where a grouped section sits in
/// the joined document and what it starts with.
#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub section_index: usize,
    pub start: usize,
    pub end: usize,
    pub char_count: usize,
    pub pages: Vec<usize>,
    pub preview: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub command: String,
    pub input: ChunkInputInfo,
    pub params: ChunkParams,
    pub report: PipelineReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkInputInfo {
    pub path: String,
    pub sha256: String,
    pub page_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkParams {
    pub chunk_sizes: Vec<usize>,
    pub language_code: Option<String>,
    pub supplied_pattern_count: usize,
    pub min_section_chars: usize,
    pub edge_zone_lines: usize,
    pub lookahead_pages: usize,
    pub similarity_threshold: u32,
}
