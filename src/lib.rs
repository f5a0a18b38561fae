//! Page-oriented text cleaning, structural segmentation, and
//! multi-resolution chunking.
//!
//! Raw page texts go through repeated header/footer removal and noise
//! filtering, get joined into one document with a page-offset index,
//! are cut into sections at language-specific heading markers, and are
//! finally split into overlapping chunks at one or more target sizes,
//! each chunk carrying the pages it came from.

pub mod cli;
pub mod commands;
pub mod engine;
pub mod model;
pub mod util;

pub use engine::{
    ChunkOptions, ChunkOutcome, SegmentedDocument, run_pipeline, segment_and_chunk,
    segment_document,
};
pub use model::{Chunk, PageOffset, PipelineReport, Section};
