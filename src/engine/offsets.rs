use crate::model::PageOffset;

/// Separator used when concatenating normalized pages into one document
/// string. Offset bookkeeping assumes its length everywhere.
pub const PAGE_JOIN_SEPARATOR: &str = "\n\n";

pub fn build_page_offsets(pages: &[String]) -> Vec<PageOffset> {
    let mut offsets = Vec::with_capacity(pages.len());
    let mut position = 0usize;

    for (index, page) in pages.iter().enumerate() {
        let length = page.len();
        offsets.push(PageOffset {
            page: index + 1,
            start: position,
            end: position + length,
        });
        position += length + PAGE_JOIN_SEPARATOR.len();
    }

    offsets
}

/// Pages whose range intersects `[start, end]`. The comparison is
/// inclusive at both boundaries: a chunk that ends exactly on a page
/// join is attributed to both neighboring pages.
pub fn map_chunk_to_pages(start: usize, end: usize, page_offsets: &[PageOffset]) -> Vec<usize> {
    page_offsets
        .iter()
        .filter(|offset| offset.end >= start && offset.start <= end)
        .map(|offset| offset.page)
        .collect()
}
