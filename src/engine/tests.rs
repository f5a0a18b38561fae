use super::*;

use crate::model::{PipelineReport, Section};

fn page_lines(pages: &[&str]) -> Vec<Vec<String>> {
    pages
        .iter()
        .map(|page| page.lines().map(str::to_string).collect())
        .collect()
}

fn borrow_lines(pages: &[Vec<String>]) -> Vec<Vec<&str>> {
    pages
        .iter()
        .map(|lines| lines.iter().map(String::as_str).collect())
        .collect()
}

#[test]
fn normalize_page_drops_noise_lines_and_collapses_whitespace() {
    let filter = NoiseLineFilter::new();
    let page = "  Some   heading \n\n----\nPage 3 of 12\nPagina 3 van 12\n© Copyright 2020 Acme\nBody  text   here";

    let (normalized, noise_lines) = filter.normalize_page(page);

    assert_eq!(normalized, "Some heading\nBody text here");
    assert_eq!(noise_lines, 4);
}

#[test]
fn normalize_page_of_blank_lines_yields_empty_string() {
    let filter = NoiseLineFilter::new();
    let (normalized, noise_lines) = filter.normalize_page("\n   \n\t\n");

    assert_eq!(normalized, "");
    assert_eq!(noise_lines, 0);
}

#[test]
fn sample_text_from_pages_respects_char_budget() {
    let pages = vec![
        "alpha".to_string(),
        "   ".to_string(),
        "beta gamma".to_string(),
    ];

    assert_eq!(sample_text_from_pages(&pages, 8), "alpha\n\nb");
    assert_eq!(sample_text_from_pages(&pages, 100), "alpha\n\nbeta gamma");
    assert_eq!(sample_text_from_pages(&pages, 0), "");
}

#[test]
fn sample_budget_charges_the_page_joiners() {
    let pages = vec!["aaaa".to_string(), "bbbb".to_string()];

    assert_eq!(sample_text_from_pages(&pages, 10), "aaaa\n\nbbbb");
    assert_eq!(sample_text_from_pages(&pages, 9), "aaaa\n\nbbb");
    // No room for the joiner plus content, so the second page is cut
    // entirely rather than overshooting the budget.
    assert_eq!(sample_text_from_pages(&pages, 6), "aaaa");
    assert!(sample_text_from_pages(&pages, 9).chars().count() <= 9);
}

#[test]
fn collect_repeating_lines_finds_exact_headers_and_footers() {
    let pages = page_lines(&[
        "ACME Corp\nintro a\nfooter X",
        "acme  corp\ndifferent b\nfooter X",
        "ACME CORP\nother c\nfooter X",
    ]);
    let pages = borrow_lines(&pages);

    let (headers, footers) = collect_repeating_lines(&pages, 1, 2, 100);

    assert!(headers.contains("acme corp"));
    assert!(footers.contains("footer x"));
    assert!(!headers.contains("intro a"));
}

#[test]
fn collect_repeating_lines_fuzzy_threshold_catches_varying_titles() {
    let pages = page_lines(&[
        "Running Title 1\nbody alpha",
        "Running Title 2\nbody beta",
        "Running Title 3\nbody gamma",
    ]);
    let pages = borrow_lines(&pages);

    let (strict_headers, _) = collect_repeating_lines(&pages, 1, 2, 100);
    assert!(strict_headers.is_empty());

    let (fuzzy_headers, _) = collect_repeating_lines(&pages, 1, 2, 85);
    assert!(fuzzy_headers.contains("running title 1"));
}

#[test]
fn remove_repeating_lines_only_touches_edge_zones() {
    let pages = page_lines(&["REPEAT\nREPEAT\nbody\nREPEAT"]);
    let pages = borrow_lines(&pages);
    let candidates = std::collections::HashSet::from(["repeat".to_string()]);

    let outcome = remove_repeating_lines(&pages, &candidates, &candidates, 1);

    assert_eq!(outcome.pages, vec!["REPEAT\nbody".to_string()]);
    assert_eq!(outcome.header_lines_removed, 1);
    assert_eq!(outcome.footer_lines_removed, 1);
}

#[test]
fn repeated_line_removal_is_idempotent() {
    let raw_pages = page_lines(&[
        "Acme Report\nbody one",
        "Acme Report\nbody two",
        "Acme Report\nbody three",
    ]);
    let raw_pages = borrow_lines(&raw_pages);

    let (headers, footers) = collect_repeating_lines(&raw_pages, 5, 2, 100);
    assert!(!headers.is_empty());
    let cleaned = remove_repeating_lines(&raw_pages, &headers, &footers, 5);

    let cleaned_lines = cleaned
        .pages
        .iter()
        .map(|page| page.lines().collect::<Vec<&str>>())
        .collect::<Vec<Vec<&str>>>();
    let (second_headers, second_footers) = collect_repeating_lines(&cleaned_lines, 5, 2, 100);
    assert!(second_headers.is_empty());
    assert!(second_footers.is_empty());

    let second_pass = remove_repeating_lines(&cleaned_lines, &second_headers, &second_footers, 5);
    assert_eq!(second_pass.pages, cleaned.pages);
    assert_eq!(second_pass.header_lines_removed, 0);
    assert_eq!(second_pass.footer_lines_removed, 0);
}

#[test]
fn sections_tile_the_full_text_without_gaps() {
    let full_text = "Preamble line.\nArticle 1 Scope\nSome text.\nArticle 2 Terms\nMore text.";
    let (regexes, skipped) = compile_section_patterns(builtin_section_patterns(Some("en")));
    assert_eq!(skipped, 0);
    assert!(count_section_matches(full_text, &regexes) >= 2);

    let sections = split_into_sections(full_text, &regexes);

    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0].start, 0);
    assert_eq!(sections.last().map(|section| section.end), Some(full_text.len()));
    for pair in sections.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    let rebuilt = sections
        .iter()
        .map(|section| section.text.as_str())
        .collect::<String>();
    assert_eq!(rebuilt, full_text);
}

#[test]
fn no_matches_means_single_section() {
    let full_text = "plain text without any markers at all";
    let (regexes, _) = compile_section_patterns(builtin_section_patterns(Some("en")));

    let sections = split_into_sections(full_text, &regexes);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].text, full_text);
}

#[test]
fn unknown_language_has_no_builtin_patterns() {
    assert!(builtin_section_patterns(Some("xx")).is_empty());
    assert!(builtin_section_patterns(None).is_empty());
    assert!(!builtin_section_patterns(Some("en")).is_empty());
    assert!(!builtin_section_patterns(Some("nl")).is_empty());
}

#[test]
fn sparse_supplied_patterns_fall_back_to_language_defaults() {
    let full_text = "Article 1 Intro\nbody text\nArticle 2 Detail\nmore body";
    let supplied = vec![r"Nonexistent\s+Marker".to_string()];

    let selection = select_section_patterns(full_text, Some("en"), Some(&supplied));

    assert_eq!(selection.source, PatternSource::LanguageDefault);
    assert!(selection.fallback_applied);
    assert!(count_section_matches(full_text, &selection.regexes) >= 2);
    assert_eq!(split_into_sections(full_text, &selection.regexes).len(), 2);
}

#[test]
fn supplied_patterns_matching_twice_are_accepted() {
    let full_text = "Part 1 Alpha\nbody\nPart 2 Beta\nbody";
    let supplied = vec![r"Part\s+\d+".to_string()];

    let selection = select_section_patterns(full_text, Some("en"), Some(&supplied));

    assert_eq!(selection.source, PatternSource::Supplied);
    assert!(!selection.fallback_applied);
    assert_eq!(split_into_sections(full_text, &selection.regexes).len(), 2);
}

#[test]
fn supplied_empty_pattern_list_disables_segmentation() {
    let full_text = "Article 1 Intro\nbody\nArticle 2 Detail\nbody";

    let selection = select_section_patterns(full_text, Some("en"), Some(&[]));

    assert_eq!(selection.source, PatternSource::None);
    assert!(selection.regexes.is_empty());
    assert_eq!(split_into_sections(full_text, &selection.regexes).len(), 1);
}

#[test]
fn malformed_supplied_pattern_is_skipped_not_fatal() {
    let full_text = "Heading 1\nbody\nHeading 2\nbody";
    let supplied = vec!["[unclosed".to_string(), r"Heading\s+\d+".to_string()];

    let selection = select_section_patterns(full_text, None, Some(&supplied));

    assert_eq!(selection.skipped, 1);
    assert_eq!(selection.source, PatternSource::Supplied);
    assert_eq!(split_into_sections(full_text, &selection.regexes).len(), 2);
}

#[test]
fn markers_must_start_a_line() {
    let full_text = "see Article 1 mentioned inline\nArticle 2 Real heading\nbody\nArticle 3 Another\nbody";
    let (regexes, _) = compile_section_patterns(builtin_section_patterns(Some("en")));

    let sections = split_into_sections(full_text, &regexes);

    // Only the line-initial markers cut the text; the inline mention
    // stays inside the leading section.
    assert_eq!(sections.len(), 3);
    assert!(sections[0].text.contains("mentioned inline"));
    assert!(sections[1].text.starts_with("Article 2"));
}

#[test]
fn short_sections_merge_into_next_qualifying_section() {
    let sections = vec![
        Section {
            start: 0,
            end: 50,
            text: "a".repeat(50),
        },
        Section {
            start: 50,
            end: 100,
            text: "b".repeat(50),
        },
        Section {
            start: 100,
            end: 600,
            text: "c".repeat(500),
        },
    ];

    let grouped = group_short_sections(sections, 200);

    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].start, 0);
    assert_eq!(grouped[0].end, 600);
    assert_eq!(
        grouped[0].text,
        format!("{}\n\n{}\n\n{}", "a".repeat(50), "b".repeat(50), "c".repeat(500))
    );
}

#[test]
fn trailing_short_sections_are_emitted_as_their_own_section() {
    let sections = vec![
        Section {
            start: 0,
            end: 500,
            text: "a".repeat(500),
        },
        Section {
            start: 500,
            end: 550,
            text: "b".repeat(50),
        },
    ];

    let grouped = group_short_sections(sections, 200);

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[1].text, "b".repeat(50));
}

#[test]
fn blank_sections_are_dropped_during_grouping() {
    let sections = vec![
        Section {
            start: 0,
            end: 4,
            text: "  \n ".to_string(),
        },
        Section {
            start: 4,
            end: 504,
            text: "x".repeat(500),
        },
    ];

    let grouped = group_short_sections(sections, 200);

    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].text, "x".repeat(500));
}

#[test]
fn page_offsets_account_for_the_join_separator() {
    let pages = vec!["AAAAA".to_string(), "BBBBB".to_string()];

    let offsets = build_page_offsets(&pages);

    assert_eq!(offsets.len(), 2);
    assert_eq!((offsets[0].start, offsets[0].end), (0, 5));
    assert_eq!((offsets[1].start, offsets[1].end), (7, 12));
    assert_eq!(offsets[0].end + PAGE_JOIN_SEPARATOR.len(), offsets[1].start);
}

#[test]
fn chunk_page_attribution_is_inclusive_at_boundaries() {
    let pages = vec!["AAAAA".to_string(), "BBBBB".to_string()];
    let offsets = build_page_offsets(&pages);

    assert_eq!(map_chunk_to_pages(0, 5, &offsets), vec![1]);
    assert_eq!(map_chunk_to_pages(4, 7, &offsets), vec![1, 2]);
    assert_eq!(map_chunk_to_pages(8, 12, &offsets), vec![2]);
}

#[test]
fn split_section_text_packs_pieces_with_overlap() {
    let chunks = split_section_text("a b c d e f g h", 8, 4);

    assert_eq!(chunks, vec!["a b c d ", "c d e f ", "e f g h"]);
    assert!(chunks.iter().all(|chunk| chunk.len() <= 8));
}

#[test]
fn split_section_text_prefers_sentence_boundaries() {
    let chunks = split_section_text("One. Two. Three. Four.", 12, 0);

    assert_eq!(chunks, vec!["One. Two.", " Three.", " Four."]);
    assert!(chunks.iter().all(|chunk| chunk.trim_end().ends_with('.')));
}

#[test]
fn character_window_fallback_keeps_the_overlap() {
    let chunks = split_section_text("abcdefghijklmnopqrstuvwxy", 10, 2);

    assert_eq!(chunks, vec!["abcdefghij", "ijklmnopqr", "qrstuvwxy"]);
    for pair in chunks.windows(2) {
        assert!(pair[1].starts_with(&pair[0][pair[0].len() - 2..]));
    }
}

#[test]
fn character_window_fallback_without_overlap_is_disjoint() {
    let text = "x".repeat(25);

    let chunks = split_section_text(&text, 10, 0);

    assert_eq!(
        chunks.iter().map(String::len).collect::<Vec<usize>>(),
        vec![10, 10, 5]
    );
    assert_eq!(chunks.concat(), text);
}

#[test]
fn overlap_carry_is_trimmed_to_fit_not_discarded() {
    let chunks = split_section_text("aa bb cc ddddd", 10, 6);

    // The full two-piece carry plus the long word would overshoot; one
    // carried piece still fits and survives.
    assert_eq!(chunks, vec!["aa bb cc ", "cc ddddd"]);
}

#[test]
fn split_section_text_fragments_are_substrings_of_the_input() {
    let text = "First paragraph of the section.\n\nSecond paragraph, a bit longer than the first.\n\nThird paragraph closes it out.";

    for chunk in split_section_text(text, 40, 8) {
        assert!(text.contains(&chunk));
    }
}

#[test]
fn small_section_emits_exactly_one_chunk_per_size() {
    let pages = vec!["short text".to_string()];
    let offsets = build_page_offsets(&pages);
    let sections = vec![Section {
        start: 0,
        end: 10,
        text: "short text".to_string(),
    }];
    let mut report = PipelineReport::default();

    let chunks = chunk_sections(&sections, &[50, 100], &offsets, &mut report);

    assert_eq!(chunks.len(), 2);
    for chunk in &chunks {
        assert_eq!(chunk.chunk_index, 0);
        assert_eq!(chunk.text, "short text");
        assert_eq!(chunk.pages, vec![1]);
    }
    assert_eq!(report.chunks_by_size.len(), 2);
    assert!(report.chunks_by_size.iter().all(|count| count.chunk_count == 1));
}

#[test]
fn chunk_indices_span_sections_within_one_size() {
    let pages = vec!["aaaa".to_string(), "bbbb".to_string()];
    let offsets = build_page_offsets(&pages);
    let sections = vec![
        Section {
            start: 0,
            end: 4,
            text: "aaaa".to_string(),
        },
        Section {
            start: 6,
            end: 10,
            text: "bbbb".to_string(),
        },
    ];
    let mut report = PipelineReport::default();

    let chunks = chunk_sections(&sections, &[100, 200], &offsets, &mut report);

    assert_eq!(chunks.len(), 4);
    let first_size = chunks
        .iter()
        .filter(|chunk| chunk.chunk_size == 100)
        .map(|chunk| chunk.chunk_index)
        .collect::<Vec<usize>>();
    let second_size = chunks
        .iter()
        .filter(|chunk| chunk.chunk_size == 200)
        .map(|chunk| chunk.chunk_index)
        .collect::<Vec<usize>>();
    assert_eq!(first_size, vec![0, 1]);
    assert_eq!(second_size, vec![0, 1]);
}

#[test]
fn oversized_section_chunks_resolve_pages_across_the_join() {
    let pages = vec!["AAAAA".to_string(), "BBBBB".to_string()];
    let offsets = build_page_offsets(&pages);
    let sections = vec![Section {
        start: 0,
        end: 12,
        text: "AAAAA\n\nBBBBB".to_string(),
    }];
    let mut report = PipelineReport::default();

    let chunks = chunk_sections(&sections, &[7], &offsets, &mut report);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].text, "AAAAA");
    assert_eq!(chunks[0].pages, vec![1]);
    assert_eq!(chunks[1].text, "BBBBB");
    assert_eq!(chunks[1].pages, vec![2]);
    assert_eq!(report.offset_best_effort_count, 0);
}

#[test]
fn empty_input_yields_no_chunks() {
    assert!(segment_and_chunk(&[], &[400], None, None).is_empty());

    let blank_pages = vec!["".to_string(), "   \n \n".to_string()];
    assert!(segment_and_chunk(&blank_pages, &[400], Some("en"), None).is_empty());
}

#[test]
fn chunking_two_chapter_pages_end_to_end() {
    let pages = vec![
        "Chapter I\nIntro text here.".to_string(),
        "Chapter II\nMore text here.".to_string(),
    ];

    let chunks = segment_and_chunk(&pages, &[50], Some("en"), None);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].chunk_index, 0);
    assert_eq!(chunks[0].text, "Chapter I\nIntro text here.");
    assert_eq!(chunks[0].pages, vec![1]);
    assert_eq!(chunks[1].chunk_index, 1);
    assert_eq!(chunks[1].text, "Chapter II\nMore text here.");
    assert_eq!(chunks[1].pages, vec![2]);
}

#[test]
fn run_pipeline_report_tracks_cleaning_and_pattern_source() {
    let pages = vec![
        "Acme Handbook\nArticle 1 Scope\nPage 1 of 3\nThis is the first body.".to_string(),
        "Acme Handbook\nArticle 2 Terms\nPage 2 of 3\nThis is the second body.".to_string(),
        "Acme Handbook\nArticle 3 Close\nPage 3 of 3\nThis is the third body.".to_string(),
    ];

    let outcome = run_pipeline(&pages, &[400], Some("en"), None, &ChunkOptions::default());

    assert_eq!(outcome.report.page_count, 3);
    assert_eq!(outcome.report.header_lines_removed, 3);
    assert!(outcome.report.noise_lines_removed >= 3);
    assert_eq!(outcome.report.pattern_source, "language_default");
    assert_eq!(outcome.report.section_count, 3);
    assert_eq!(outcome.report.chunk_count, outcome.chunks.len());
    assert!(!outcome.chunks.is_empty());
    assert!(
        outcome
            .chunks
            .iter()
            .all(|chunk| !chunk.text.contains("Acme Handbook"))
    );
}
