use tracing::warn;

use crate::model::{Chunk, ChunkSizeCount, PageOffset, PipelineReport, Section};

use super::offsets::map_chunk_to_pages;

/// Separator cascade for recursive splitting, coarsest first: paragraph
/// breaks, sentence terminators, line breaks, words, then raw character
/// pieces as the last resort.
const SPLIT_SEPARATORS: &[&str] = &["\n\n", ".", "!", "?", "\n", " "];

fn overlap_for(chunk_size: usize) -> usize {
    chunk_size / 5
}

/// Splits section text into fragments of at most `chunk_size` bytes
/// with roughly `overlap` bytes carried between neighbors. Fragments
/// are always contiguous substrings of the input: decomposition keeps
/// each separator attached to the piece before it, and overlap is
/// carried as whole trailing pieces rather than an arbitrary suffix.
pub fn split_section_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let pieces = decompose_text(text, 0, chunk_size, overlap);
    merge_pieces(&pieces, chunk_size, overlap)
}

fn decompose_text(
    text: &str,
    separator_index: usize,
    chunk_size: usize,
    overlap: usize,
) -> Vec<String> {
    if text.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let Some(separator) = SPLIT_SEPARATORS.get(separator_index) else {
        return split_by_chars(text, chunk_size, overlap);
    };

    let parts = text.split_inclusive(*separator).collect::<Vec<&str>>();
    if parts.len() <= 1 {
        return decompose_text(text, separator_index + 1, chunk_size, overlap);
    }

    let mut pieces = Vec::with_capacity(parts.len());
    for part in parts {
        if part.len() > chunk_size {
            pieces.extend(decompose_text(part, separator_index + 1, chunk_size, overlap));
        } else {
            pieces.push(part.to_string());
        }
    }

    pieces
}

/// Separator-free text is cut into pieces no larger than the overlap so
/// the merge pass can still carry pieces between neighboring chunks;
/// with zero overlap the pieces are full windows.
fn split_by_chars(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let piece_size = if overlap > 0 {
        overlap.min(chunk_size)
    } else {
        chunk_size
    };

    let mut pieces = Vec::new();
    let mut current = String::new();

    for character in text.chars() {
        if !current.is_empty() && current.len() + character.len_utf8() > piece_size {
            pieces.push(std::mem::take(&mut current));
        }
        current.push(character);
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

fn merge_pieces(pieces: &[String], chunk_size: usize, overlap: usize) -> Vec<String> {
    let mut chunks = Vec::<String>::new();
    let mut window = Vec::<&String>::new();
    let mut window_len = 0usize;

    for piece in pieces {
        if !window.is_empty() && window_len + piece.len() > chunk_size {
            chunks.push(window.iter().map(|part| part.as_str()).collect::<String>());

            // Carry trailing pieces into the next window as overlap.
            let mut kept = Vec::<&String>::new();
            let mut kept_len = 0usize;
            for previous in window.iter().rev() {
                if kept_len + previous.len() > overlap {
                    break;
                }
                kept.push(*previous);
                kept_len += previous.len();
            }
            kept.reverse();

            // Trim the carry from the front until the incoming piece
            // fits; partial overlap beats none.
            while !kept.is_empty() && kept_len + piece.len() > chunk_size {
                let removed = kept.remove(0);
                kept_len -= removed.len();
            }
            window = kept;
            window_len = kept_len;
        }

        window.push(piece);
        window_len += piece.len();
    }

    if !window.is_empty() {
        chunks.push(window.iter().map(|part| part.as_str()).collect::<String>());
    }

    chunks
}

/// Runs one independent splitting pass per requested chunk size over
/// the grouped sections, resolving every fragment back to absolute
/// offsets and source pages. `chunk_index` increments per emitted chunk
/// within one size, across all sections.
pub fn chunk_sections(
    sections: &[Section],
    chunk_sizes: &[usize],
    page_offsets: &[PageOffset],
    report: &mut PipelineReport,
) -> Vec<Chunk> {
    let mut chunks = Vec::<Chunk>::new();

    for &chunk_size in chunk_sizes {
        let overlap = overlap_for(chunk_size);
        let mut chunk_index = 0usize;

        for section in sections {
            let section_text = section.text.as_str();
            if section_text.trim().is_empty() {
                continue;
            }

            if section_text.len() <= chunk_size {
                let pages = map_chunk_to_pages(section.start, section.end, page_offsets);
                chunks.push(Chunk {
                    chunk_size,
                    chunk_index,
                    text: section_text.to_string(),
                    pages,
                });
                chunk_index += 1;
                continue;
            }

            let fragments = split_section_text(section_text, chunk_size, overlap);
            let mut cursor = 0usize;

            for fragment in fragments {
                let content = fragment.trim();
                if content.is_empty() {
                    continue;
                }

                let start_in_section =
                    resolve_fragment_offset(section_text, content, cursor, report);
                let end_in_section = start_in_section + content.len();
                cursor = end_in_section;

                let start = section.start + start_in_section;
                let end = section.start + end_in_section;
                let pages = map_chunk_to_pages(start, end, page_offsets);

                chunks.push(Chunk {
                    chunk_size,
                    chunk_index,
                    text: content.to_string(),
                    pages,
                });
                chunk_index += 1;
            }
        }

        report.chunks_by_size.push(ChunkSizeCount {
            chunk_size,
            chunk_count: chunk_index,
        });
    }

    chunks
}

/// Locates a fragment inside its section: forward search from the end
/// of the previous fragment first (so repeated identical fragments
/// resolve in order), then a first-occurrence search, then the section
/// start as a best effort. The fragment is emitted regardless —
/// provenance may degrade, content is never dropped.
fn resolve_fragment_offset(
    section_text: &str,
    content: &str,
    cursor: usize,
    report: &mut PipelineReport,
) -> usize {
    if let Some(position) = section_text[cursor..].find(content) {
        return cursor + position;
    }

    report.offset_fallback_count += 1;
    if let Some(position) = section_text.find(content) {
        return position;
    }

    report.offset_best_effort_count += 1;
    warn!(
        fragment_len = content.len(),
        "fragment not found in its section; attributing to section start"
    );
    0
}
