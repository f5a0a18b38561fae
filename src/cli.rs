use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pagechunk",
    version,
    about = "Structural segmentation and multi-resolution chunking for page-based text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Chunk(ChunkArgs),
    Sections(SectionsArgs),
    Sample(SampleArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ChunkArgs {
    /// Page text input: a JSON array of page strings (.json) or
    /// form-feed separated plain text.
    #[arg(long)]
    pub input: PathBuf,

    /// Target chunk size in characters; repeat for multiple resolutions.
    /// Defaults to 400 and 1600 when omitted.
    #[arg(long = "chunk-size")]
    pub chunk_sizes: Vec<usize>,

    /// ISO 639-1 language code selecting the built-in section markers.
    #[arg(long)]
    pub language: Option<String>,

    /// Section marker regex; repeat for multiple markers. Overrides the
    /// built-in table when the markers actually match the text.
    #[arg(long = "pattern")]
    pub patterns: Vec<String>,

    /// File with one section marker regex per line; blank lines and
    /// lines starting with '#' are ignored.
    #[arg(long)]
    pub patterns_file: Option<PathBuf>,

    #[arg(long, default_value_t = 200)]
    pub min_section_chars: usize,

    #[arg(long, default_value_t = 5)]
    pub edge_zone_lines: usize,

    #[arg(long, default_value_t = 2)]
    pub lookahead_pages: usize,

    #[arg(long, default_value_t = 100)]
    pub similarity_threshold: u32,

    /// Write chunk records here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also write a run manifest with input digest, parameters, and the
    /// pipeline report.
    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SectionsArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long = "pattern")]
    pub patterns: Vec<String>,

    #[arg(long)]
    pub patterns_file: Option<PathBuf>,

    #[arg(long, default_value_t = 200)]
    pub min_section_chars: usize,

    #[arg(long, default_value_t = 5)]
    pub edge_zone_lines: usize,

    #[arg(long, default_value_t = 2)]
    pub lookahead_pages: usize,

    #[arg(long, default_value_t = 100)]
    pub similarity_threshold: u32,
}

#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    #[arg(long)]
    pub input: PathBuf,

    /// Character budget for the cleaned text sample.
    #[arg(long, default_value_t = 6000)]
    pub max_chars: usize,

    #[arg(long, default_value_t = 5)]
    pub edge_zone_lines: usize,

    #[arg(long, default_value_t = 2)]
    pub lookahead_pages: usize,

    #[arg(long, default_value_t = 100)]
    pub similarity_threshold: u32,
}
