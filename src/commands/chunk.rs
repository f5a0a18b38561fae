use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::cli::ChunkArgs;
use crate::engine::{ChunkOptions, ChunkOutcome, run_pipeline};
use crate::model::{ChunkInputInfo, ChunkParams, ChunkRunManifest};
use crate::util::{now_utc_string, sha256_file, utc_compact_string, write_json_pretty};

/// Resolutions used when no `--chunk-size` is given: a fine size for
/// precise retrieval and a coarse size for context.
const DEFAULT_CHUNK_SIZES: &[usize] = &[400, 1600];

pub fn run(args: ChunkArgs) -> Result<()> {
    let pages = super::read_pages(&args.input)?;
    let section_patterns =
        super::load_section_patterns(&args.patterns, args.patterns_file.as_deref())?;

    let chunk_sizes = if args.chunk_sizes.is_empty() {
        DEFAULT_CHUNK_SIZES.to_vec()
    } else {
        args.chunk_sizes.clone()
    };

    let options = ChunkOptions {
        edge_zone_lines: args.edge_zone_lines,
        lookahead_pages: args.lookahead_pages,
        similarity_threshold: args.similarity_threshold,
        min_section_chars: args.min_section_chars,
    };

    info!(
        input = %args.input.display(),
        pages = pages.len(),
        sizes = ?chunk_sizes,
        "chunking input"
    );

    let outcome = run_pipeline(
        &pages,
        &chunk_sizes,
        args.language.as_deref(),
        section_patterns.as_deref(),
        &options,
    );

    match &args.output {
        Some(path) => {
            write_json_pretty(path, &outcome.chunks)?;
            info!(path = %path.display(), chunks = outcome.chunks.len(), "wrote chunk records");
        }
        None => {
            let rendered = serde_json::to_string_pretty(&outcome.chunks)
                .context("failed to serialize chunk records")?;
            println!("{rendered}");
        }
    }

    if let Some(manifest_path) = &args.manifest_path {
        let manifest = build_manifest(&args, pages.len(), &chunk_sizes, &section_patterns, &outcome)?;
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), run_id = %manifest.run_id, "wrote chunk-run manifest");
    }

    Ok(())
}

fn build_manifest(
    args: &ChunkArgs,
    page_count: usize,
    chunk_sizes: &[usize],
    section_patterns: &Option<Vec<String>>,
    outcome: &ChunkOutcome,
) -> Result<ChunkRunManifest> {
    let sha256 = sha256_file(&args.input)?;

    Ok(ChunkRunManifest {
        manifest_version: 1,
        run_id: format!("chunk-{}", utc_compact_string(Utc::now())),
        generated_at: now_utc_string(),
        command: render_command(args, chunk_sizes),
        input: ChunkInputInfo {
            path: args.input.display().to_string(),
            sha256,
            page_count,
        },
        params: ChunkParams {
            chunk_sizes: chunk_sizes.to_vec(),
            language_code: args.language.clone(),
            supplied_pattern_count: section_patterns.as_ref().map_or(0, Vec::len),
            min_section_chars: args.min_section_chars,
            edge_zone_lines: args.edge_zone_lines,
            lookahead_pages: args.lookahead_pages,
            similarity_threshold: args.similarity_threshold,
        },
        report: outcome.report.clone(),
    })
}

fn render_command(args: &ChunkArgs, chunk_sizes: &[usize]) -> String {
    let mut parts = vec![
        "pagechunk".to_string(),
        "chunk".to_string(),
        format!("--input {}", args.input.display()),
    ];
    for size in chunk_sizes {
        parts.push(format!("--chunk-size {size}"));
    }
    if let Some(language) = &args.language {
        parts.push(format!("--language {language}"));
    }
    parts.join(" ")
}
