// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Chapter start detection.
//
// Two independent strategies: a visual one (an oversized run near the top of
// the page) and a textual one (the first lines match a heading pattern).
// The visual title wins when both fire.

use seitenwerk_core::{AnalysisConfig, PageContent};
use tracing::trace;

use crate::patterns::CompiledPatterns;

/// Which strategy produced a chapter title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingSource {
    Visual,
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterHeading {
    pub title: String,
    pub source: HeadingSource,
}

/// Median font size of all non-empty runs (upper median for even counts).
pub fn median_font_size(page: &PageContent) -> Option<f32> {
    let mut sizes: Vec<f32> = page
        .runs
        .iter()
        .filter(|run| run.font_size > 0.0 && !run.text.trim().is_empty())
        .map(|run| run.font_size)
        .collect();
    if sizes.is_empty() {
        return None;
    }
    sizes.sort_by(f32::total_cmp);
    Some(sizes[sizes.len() / 2])
}

fn is_all_uppercase(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}

/// Largest run in the top `heading_region` of the page, if it reads as a heading.
pub fn detect_visual_heading(page: &PageContent, config: &AnalysisConfig) -> Option<String> {
    let median = median_font_size(page)?;
    let region_floor = page.height * (1.0 - config.heading_region);

    let mut largest: Option<(&str, f32)> = None;
    for run in &page.runs {
        let text = run.text.trim();
        if run.y < region_floor || text.chars().count() < 2 {
            continue;
        }
        if largest.is_none_or(|(_, size)| run.font_size > size) {
            largest = Some((text, run.font_size));
        }
    }
    let (text, size) = largest?;

    let prominent =
        size >= config.heading_size_ratio * median || size > config.heading_absolute_size;
    let styled = is_all_uppercase(text) || size >= config.heading_strong_ratio * median;
    let length = text.chars().count();
    let sized = (config.title_min_chars..config.title_max_chars).contains(&length);

    trace!(text, size, median, prominent, styled, sized, "Visual heading candidate");
    (prominent && styled && sized).then(|| text.to_owned())
}

/// First of the leading lines that matches a heading pattern and is not a
/// table-of-contents entry.
pub fn detect_pattern_heading(
    text: &str,
    config: &AnalysisConfig,
    patterns: &CompiledPatterns,
) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(config.pattern_lines)
        .find(|line| patterns.heading_category(line).is_some() && !patterns.is_toc_entry(line))
        .map(|line| line.chars().take(config.title_max_chars).collect())
}

pub fn detect_chapter(
    page: &PageContent,
    config: &AnalysisConfig,
    patterns: &CompiledPatterns,
) -> Option<ChapterHeading> {
    if let Some(title) = detect_visual_heading(page, config) {
        return Some(ChapterHeading {
            title,
            source: HeadingSource::Visual,
        });
    }
    detect_pattern_heading(&page.text, config, patterns).map(|title| ChapterHeading {
        title,
        source: HeadingSource::Pattern,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternTable;
    use crate::test_support::{body_page, body_run, text_page};
    use seitenwerk_core::TextRun;

    fn patterns() -> CompiledPatterns {
        CompiledPatterns::compile(&PatternTable::builtin()).unwrap()
    }

    fn page_with_heading(heading: TextRun) -> PageContent {
        let mut page = body_page(
            1,
            &[
                "The first paragraph of the chapter begins here.",
                "It continues on this second line of body text.",
                "A third line keeps the median at body size.",
                "And a fourth for good measure.",
            ],
        );
        page.text = format!("{}\n{}", heading.text, page.text);
        page.runs.insert(0, heading);
        page
    }

    #[test]
    fn large_heading_at_top_is_a_chapter() {
        let page = page_with_heading(TextRun::new("Chapter 3: Results", 72.0, 740.0, 24.0, 220.0));
        let heading = detect_chapter(&page, &AnalysisConfig::default(), &patterns()).unwrap();
        assert_eq!(heading.source, HeadingSource::Visual);
        assert!(heading.title.starts_with("Chapter 3"));
    }

    #[test]
    fn uppercase_heading_needs_less_size() {
        // 15pt over an 11pt median: above 1.3x but below 1.5x, saved by capitals.
        let page = page_with_heading(TextRun::new("METHODS", 72.0, 740.0, 15.0, 80.0));
        assert_eq!(
            detect_visual_heading(&page, &AnalysisConfig::default()).as_deref(),
            Some("METHODS")
        );

        let page = page_with_heading(TextRun::new("Methods", 72.0, 740.0, 15.0, 80.0));
        assert_eq!(detect_visual_heading(&page, &AnalysisConfig::default()), None);
    }

    #[test]
    fn large_text_low_on_the_page_is_ignored() {
        let page = page_with_heading(TextRun::new("Pull Quote Text", 72.0, 200.0, 24.0, 200.0));
        assert_eq!(detect_visual_heading(&page, &AnalysisConfig::default()), None);
    }

    #[test]
    fn overlong_heading_is_rejected() {
        let long = "A".repeat(120);
        let page = page_with_heading(TextRun::new(long, 72.0, 740.0, 24.0, 500.0));
        assert_eq!(detect_visual_heading(&page, &AnalysisConfig::default()), None);
    }

    #[test]
    fn uniform_body_text_has_no_visual_heading() {
        let page = body_page(1, &["Just text", "More text", "Even more text"]);
        assert_eq!(detect_visual_heading(&page, &AnalysisConfig::default()), None);
    }

    #[test]
    fn pattern_heading_without_geometry() {
        let page = text_page(5, "\n\nKapitel 7\nDie Ergebnisse\nIm folgenden Abschnitt ...");
        let heading = detect_chapter(&page, &AnalysisConfig::default(), &patterns()).unwrap();
        assert_eq!(heading.source, HeadingSource::Pattern);
        assert_eq!(heading.title, "Kapitel 7");
    }

    #[test]
    fn pattern_only_scans_leading_lines() {
        let text = "one\ntwo\nthree\nfour\nfive\nChapter 9";
        assert_eq!(
            detect_pattern_heading(text, &AnalysisConfig::default(), &patterns()),
            None
        );
    }

    #[test]
    fn toc_entries_are_not_chapters() {
        let text = "Chapter 1 Getting Started ........ 5";
        assert_eq!(
            detect_pattern_heading(text, &AnalysisConfig::default(), &patterns()),
            None
        );
    }

    #[test]
    fn pattern_title_is_truncated() {
        let text = format!("Chapter 4 {}", "x".repeat(200));
        let title = detect_pattern_heading(&text, &AnalysisConfig::default(), &patterns()).unwrap();
        assert_eq!(title.chars().count(), 100);
    }

    #[test]
    fn median_ignores_empty_runs() {
        let mut page = body_page(1, &["a", "b"]);
        page.runs.push(TextRun::new("   ", 0.0, 0.0, 90.0, 1.0));
        page.runs.push(body_run("c", 100.0));
        assert_eq!(median_font_size(&page), Some(11.0));
    }
}
