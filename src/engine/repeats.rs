use std::collections::HashSet;

use strsim::normalized_levenshtein;

#[derive(Debug, Default)]
pub struct RemovalOutcome {
    pub pages: Vec<String>,
    pub header_lines_removed: usize,
    pub footer_lines_removed: usize,
}

fn normalize_edge_line(line: &str) -> String {
    line.split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

fn lines_match(left: &str, right: &str, similarity_threshold: u32) -> bool {
    if similarity_threshold >= 100 {
        return left == right;
    }

    normalized_levenshtein(left, right) * 100.0 >= f64::from(similarity_threshold)
}

fn edge_zones<'a>(lines: &'a [&'a str], edge_zone_lines: usize) -> (&'a [&'a str], &'a [&'a str]) {
    let zone = edge_zone_lines.min(lines.len());
    let top = &lines[..zone];
    let bottom = &lines[lines.len() - zone..];
    (top, bottom)
}

/// Scans every page's top and bottom zone against the same zone of the
/// next `lookahead_pages` pages and collects lines that recur, as
/// normalized strings. One match anywhere in the window qualifies a
/// line; this is deliberately permissive so running titles with
/// embedded page numbers are still caught at fuzzy thresholds.
pub fn collect_repeating_lines(
    pages_lines: &[Vec<&str>],
    edge_zone_lines: usize,
    lookahead_pages: usize,
    similarity_threshold: u32,
) -> (HashSet<String>, HashSet<String>) {
    let mut header_candidates = HashSet::new();
    let mut footer_candidates = HashSet::new();

    for (page_index, page) in pages_lines.iter().enumerate() {
        let (top, bottom) = edge_zones(page, edge_zone_lines);
        let top_lines = top.iter().map(|line| normalize_edge_line(line)).collect::<Vec<String>>();
        let bottom_lines = bottom
            .iter()
            .map(|line| normalize_edge_line(line))
            .collect::<Vec<String>>();

        for step in 1..=lookahead_pages {
            let Some(next_page) = pages_lines.get(page_index + step) else {
                break;
            };

            let (next_top, next_bottom) = edge_zones(next_page, edge_zone_lines);
            let next_top_lines = next_top
                .iter()
                .map(|line| normalize_edge_line(line))
                .collect::<Vec<String>>();
            let next_bottom_lines = next_bottom
                .iter()
                .map(|line| normalize_edge_line(line))
                .collect::<Vec<String>>();

            for line in &top_lines {
                if !line.is_empty()
                    && next_top_lines
                        .iter()
                        .any(|other| lines_match(line, other, similarity_threshold))
                {
                    header_candidates.insert(line.clone());
                }
            }

            for line in &bottom_lines {
                if !line.is_empty()
                    && next_bottom_lines
                        .iter()
                        .any(|other| lines_match(line, other, similarity_threshold))
                {
                    footer_candidates.insert(line.clone());
                }
            }
        }
    }

    (header_candidates, footer_candidates)
}

/// Drops known header/footer lines, but only where they sit inside the
/// top/bottom zone of their page. Identical lines in the page body are
/// legitimate content and survive.
pub fn remove_repeating_lines(
    pages_lines: &[Vec<&str>],
    header_candidates: &HashSet<String>,
    footer_candidates: &HashSet<String>,
    edge_zone_lines: usize,
) -> RemovalOutcome {
    let mut outcome = RemovalOutcome::default();

    for page in pages_lines {
        let mut kept = Vec::<&str>::with_capacity(page.len());

        for (line_index, line) in page.iter().enumerate() {
            let normalized = normalize_edge_line(line);
            let in_header_zone = line_index < edge_zone_lines;
            let in_footer_zone = line_index + edge_zone_lines >= page.len();

            if in_header_zone && header_candidates.contains(&normalized) {
                outcome.header_lines_removed += 1;
                continue;
            }
            if in_footer_zone && footer_candidates.contains(&normalized) {
                outcome.footer_lines_removed += 1;
                continue;
            }

            kept.push(line);
        }

        outcome.pages.push(kept.join("\n"));
    }

    outcome
}
