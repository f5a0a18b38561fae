use anyhow::Result;
use tracing::info;

use crate::cli::SampleArgs;
use crate::engine::{ChunkOptions, clean_and_normalize_pages, sample_text_from_pages};
use crate::model::PipelineReport;

/// Emits a bounded cleaned-text sample from the leading pages, suitable
/// as input for an external language or marker inference step.
pub fn run(args: SampleArgs) -> Result<()> {
    let pages = super::read_pages(&args.input)?;

    let options = ChunkOptions {
        edge_zone_lines: args.edge_zone_lines,
        lookahead_pages: args.lookahead_pages,
        similarity_threshold: args.similarity_threshold,
        ..ChunkOptions::default()
    };

    let mut report = PipelineReport::default();
    let normalized_pages = clean_and_normalize_pages(&pages, &options, &mut report);
    let sample = sample_text_from_pages(&normalized_pages, args.max_chars);

    println!("{sample}");

    info!(
        pages = report.page_count,
        sample_chars = sample.chars().count(),
        "sample extracted"
    );

    Ok(())
}
