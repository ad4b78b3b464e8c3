// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document aggregator: classifies every page in order, then runs the
// cross-page passes (duplicate clustering, chapter ranges) and builds the
// `SmartOrganizeAnalysis`.
//
// Progress bands: 0–80% per-page work, then 85% duplicates, 90% chapters,
// 95% summary, 100% done. Pages are extracted one at a time; the first
// extraction failure aborts the run and no partial analysis is returned.

use std::time::Instant;

use chrono::Utc;
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::{
    AnalysisConfig, AnalysisId, ChapterInfo, DuplicatePageGroup, PageAnalysis, PageSource,
    SmartOrganizeAnalysis,
};
use tracing::{debug, info, instrument};

use crate::classifier::PageClassifier;
use crate::patterns::PatternTable;
use crate::progress::{CancelFlag, ProgressSink};

/// Share of the progress bar reserved for per-page classification.
const PAGE_BAND: u32 = 80;

/// Similarity reported for hash-equal pages.
const EXACT_MATCH: f32 = 1.0;

/// Orchestrates a full analysis run over a `PageSource`.
#[derive(Debug, Clone)]
pub struct SmartOrganizer {
    classifier: PageClassifier,
}

impl SmartOrganizer {
    pub fn new(config: AnalysisConfig, table: &PatternTable) -> Result<Self> {
        Ok(Self {
            classifier: PageClassifier::new(config, table)?,
        })
    }

    /// Default thresholds and the built-in pattern table.
    pub fn with_defaults() -> Result<Self> {
        Self::new(AnalysisConfig::default(), &PatternTable::builtin())
    }

    pub fn classifier(&self) -> &PageClassifier {
        &self.classifier
    }

    /// Analyse every page of `source`.
    pub async fn analyze<S, P>(&self, source: &S, progress: &mut P) -> Result<SmartOrganizeAnalysis>
    where
        S: PageSource,
        P: ProgressSink,
    {
        self.analyze_with_cancel(source, progress, &CancelFlag::new())
            .await
    }

    /// Analyse every page, checking `cancel` before each page is extracted.
    #[instrument(skip_all, fields(total_pages = source.page_count()))]
    pub async fn analyze_with_cancel<S, P>(
        &self,
        source: &S,
        progress: &mut P,
        cancel: &CancelFlag,
    ) -> Result<SmartOrganizeAnalysis>
    where
        S: PageSource,
        P: ProgressSink,
    {
        let started = Instant::now();
        let total = source.page_count();
        info!(total, "Starting structure analysis");
        progress.report(0, &format!("Analyzing {total} pages"));

        let mut pages: Vec<PageAnalysis> = Vec::with_capacity(total as usize);
        for page_number in 1..=total {
            if cancel.is_cancelled() {
                info!(pages_done = page_number - 1, total, "Analysis cancelled");
                return Err(SeitenwerkError::Cancelled {
                    pages_done: page_number - 1,
                    total,
                });
            }

            let content = source.extract_page(page_number).await?;
            if content.page_number != page_number {
                return Err(SeitenwerkError::PageExtraction {
                    page: page_number,
                    reason: format!("page source returned page {}", content.page_number),
                });
            }

            let mut analysis = self.classifier.classify(&content);
            if page_number == 1 {
                analysis.is_cover = is_cover(&analysis, self.classifier.config());
            }
            pages.push(analysis);

            let percent = (page_number * PAGE_BAND / total) as u8;
            progress.report(percent, &format!("Analyzed page {page_number} of {total}"));
        }

        progress.report(85, "Detecting duplicate pages");
        let duplicate_groups = find_duplicate_groups(&pages);

        progress.report(90, "Resolving chapters");
        let chapters = resolve_chapters(&pages);

        progress.report(95, "Summarizing issues");
        let analysis = summarize(pages, duplicate_groups, chapters, started);

        info!(
            total,
            issues = analysis.issues_count,
            blank = analysis.blank_pages.len(),
            duplicate_groups = analysis.duplicate_groups.len(),
            rotation = analysis.rotation_needed.len(),
            chapters = analysis.chapters.len(),
            elapsed_ms = analysis.analysis_time_ms,
            "Structure analysis complete"
        );
        progress.report(100, "Analysis complete");
        Ok(analysis)
    }
}

/// Page 1 is a cover when it is short and not a table of contents.
fn is_cover(first: &PageAnalysis, config: &AnalysisConfig) -> bool {
    first.page_number == 1 && first.text_length < config.cover_max_chars && !first.is_toc
}

/// Group non-blank pages with equal fingerprints.
///
/// Pairwise over the page list; a page that is blank, textless, or already
/// grouped never anchors a new group, so groups are disjoint. Only exact
/// fingerprint equality counts.
pub fn find_duplicate_groups(pages: &[PageAnalysis]) -> Vec<DuplicatePageGroup> {
    let eligible = |page: &PageAnalysis| !page.is_blank && page.text_length > 0;
    let mut grouped = vec![false; pages.len()];
    let mut groups = Vec::new();

    for (i, anchor) in pages.iter().enumerate() {
        if grouped[i] || !eligible(anchor) {
            continue;
        }

        let mut members = vec![anchor.page_number];
        for (j, other) in pages.iter().enumerate().skip(i + 1) {
            if !grouped[j] && eligible(other) && other.content_hash == anchor.content_hash {
                grouped[j] = true;
                members.push(other.page_number);
            }
        }

        if members.len() > 1 {
            grouped[i] = true;
            debug!(pages = ?members, "Duplicate group found");
            groups.push(DuplicatePageGroup {
                pages: members,
                similarity: EXACT_MATCH,
            });
        }
    }

    groups
}

/// Turn chapter-start flags into non-overlapping page ranges.
pub fn resolve_chapters(pages: &[PageAnalysis]) -> Vec<ChapterInfo> {
    let starts: Vec<&PageAnalysis> = pages.iter().filter(|page| page.is_chapter_start).collect();

    starts
        .iter()
        .enumerate()
        .map(|(index, start)| ChapterInfo {
            title: start.chapter_title.clone().unwrap_or_default(),
            start_page: start.page_number,
            end_page: starts.get(index + 1).map(|next| next.page_number - 1),
        })
        .collect()
}

/// Blank pages, plus every duplicate beyond the first of its group, plus
/// pages needing rotation.
pub fn count_issues(
    blank_pages: &[u32],
    duplicate_groups: &[DuplicatePageGroup],
    rotation_needed: &[u32],
) -> usize {
    let duplicates: usize = duplicate_groups
        .iter()
        .map(|group| group.pages.len().saturating_sub(1))
        .sum();
    blank_pages.len() + duplicates + rotation_needed.len()
}

fn page_numbers(pages: &[PageAnalysis], predicate: impl Fn(&PageAnalysis) -> bool) -> Vec<u32> {
    pages
        .iter()
        .filter(|page| predicate(page))
        .map(|page| page.page_number)
        .collect()
}

fn summarize(
    pages: Vec<PageAnalysis>,
    duplicate_groups: Vec<DuplicatePageGroup>,
    chapters: Vec<ChapterInfo>,
    started: Instant,
) -> SmartOrganizeAnalysis {
    let blank_pages = page_numbers(&pages, |page| page.is_blank);
    let rotation_needed = page_numbers(&pages, |page| page.needs_rotation);
    let toc_pages = page_numbers(&pages, |page| page.is_toc);
    let cover_page = pages
        .first()
        .filter(|page| page.is_cover)
        .map(|page| page.page_number);
    let issues_count = count_issues(&blank_pages, &duplicate_groups, &rotation_needed);

    SmartOrganizeAnalysis {
        id: AnalysisId::new(),
        analyzed_at: Utc::now(),
        total_pages: pages.len() as u32,
        pages,
        blank_pages,
        duplicate_groups,
        rotation_needed,
        chapters,
        toc_pages,
        cover_page,
        issues_count,
        analysis_time_ms: started.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::actions::{english_labels, generate_actions};
    use crate::memory_source::MemoryPageSource;
    use crate::progress::NoProgress;
    use crate::test_support::{body_page, text_page};
    use seitenwerk_core::{PageContent, SmartActionType, TextRun};

    fn organizer() -> SmartOrganizer {
        SmartOrganizer::with_defaults().unwrap()
    }

    /// Landscape page whose text column is three times taller than wide.
    fn sideways_page(page_number: u32) -> PageContent {
        let runs: Vec<TextRun> = (0..6)
            .map(|i| TextRun::new("Rotated line", 300.0, 100.0 + i as f32 * 36.0, 10.0, 60.0))
            .collect();
        PageContent {
            page_number,
            text: "Rotated table with a column of figures and more words here".repeat(2),
            runs,
            width: 792.0,
            height: 612.0,
            has_images: false,
        }
    }

    fn prose(seed: &str) -> String {
        format!("{seed} ").repeat(30)
    }

    fn five_page_document() -> MemoryPageSource {
        MemoryPageSource::new(vec![
            text_page(1, &prose("Opening remarks from the board")),
            text_page(2, &prose("Standard terms and conditions")),
            text_page(3, ""),
            text_page(4, &prose("STANDARD   terms and Conditions")),
            sideways_page(5),
        ])
    }

    #[tokio::test]
    async fn five_page_scenario() {
        let analysis = organizer()
            .analyze(&five_page_document(), &mut NoProgress)
            .await
            .unwrap();

        assert_eq!(analysis.total_pages, 5);
        assert_eq!(analysis.blank_pages, vec![3]);
        assert_eq!(analysis.duplicate_groups.len(), 1);
        assert_eq!(analysis.duplicate_groups[0].pages, vec![2, 4]);
        assert_eq!(analysis.duplicate_groups[0].similarity, 1.0);
        assert_eq!(analysis.rotation_needed, vec![5]);
        assert_eq!(analysis.issues_count, 3);
        assert_eq!(
            analysis.page(5).map(|p| p.suggested_rotation.degrees()),
            Some(90)
        );
    }

    #[tokio::test]
    async fn short_title_page_is_a_cover() {
        let mut cover = text_page(1, "Annual Report 2024");
        cover.width = 200.0;
        cover.height = 150.0;
        let source = MemoryPageSource::new(vec![cover, text_page(2, &prose("Letter to shareholders"))]);

        let analysis = organizer().analyze(&source, &mut NoProgress).await.unwrap();
        let first = analysis.page(1).unwrap();
        assert!(first.is_cover);
        assert!(!first.is_toc);
        assert!(!first.is_blank);
        assert_eq!(analysis.cover_page, Some(1));
        assert!(!analysis.page(2).unwrap().is_cover);
    }

    #[tokio::test]
    async fn short_title_on_a_letter_page_is_a_sparse_blank_cover() {
        let source = MemoryPageSource::new(vec![
            text_page(1, "Annual Report 2024"),
            text_page(2, &prose("Letter to shareholders")),
        ]);

        let analysis = organizer().analyze(&source, &mut NoProgress).await.unwrap();
        let first = analysis.page(1).unwrap();
        assert!(first.is_cover);
        assert!(first.is_blank);
        assert_eq!(first.blank_confidence, 0.70);
        assert_eq!(analysis.cover_page, Some(1));
        assert_eq!(analysis.blank_pages, vec![1]);

        let actions = generate_actions(&analysis, english_labels);
        assert_eq!(actions[0].kind, SmartActionType::RemoveBlank);
        assert_eq!(actions[0].affected_pages, vec![1]);
    }

    #[tokio::test]
    async fn toc_on_first_page_is_not_a_cover() {
        let source = MemoryPageSource::new(vec![text_page(1, "Contents\nIntro ..... 1\nBody ..... 4")]);
        let analysis = organizer().analyze(&source, &mut NoProgress).await.unwrap();
        assert!(analysis.page(1).unwrap().is_toc);
        assert_eq!(analysis.cover_page, None);
        assert_eq!(analysis.toc_pages, vec![1]);
    }

    #[tokio::test]
    async fn empty_document_is_valid() {
        let mut seen = Vec::new();
        let analysis = organizer()
            .analyze(&MemoryPageSource::new(vec![]), &mut |p: u8, _: &str| seen.push(p))
            .await
            .unwrap();

        assert_eq!(analysis.total_pages, 0);
        assert!(analysis.pages.is_empty());
        assert!(analysis.blank_pages.is_empty());
        assert!(analysis.duplicate_groups.is_empty());
        assert!(analysis.chapters.is_empty());
        assert_eq!(analysis.cover_page, None);
        assert_eq!(analysis.issues_count, 0);
        assert_eq!(seen.last(), Some(&100));
    }

    #[tokio::test]
    async fn progress_is_monotonic_and_ends_at_100() {
        let mut seen: Vec<(u8, String)> = Vec::new();
        let mut sink = |percent: u8, message: &str| seen.push((percent, message.to_owned()));
        organizer()
            .analyze(&five_page_document(), &mut sink)
            .await
            .unwrap();

        let percents: Vec<u8> = seen.iter().map(|(p, _)| *p).collect();
        assert!(percents.windows(2).all(|w| w[0] <= w[1]), "{percents:?}");
        assert_eq!(percents, vec![0, 16, 32, 48, 64, 80, 85, 90, 95, 100]);
        assert_eq!(seen.last().unwrap().1, "Analysis complete");
    }

    /// Three pages, the second of which cannot be read.
    struct DamagedSource;

    impl PageSource for DamagedSource {
        fn page_count(&self) -> u32 {
            3
        }

        async fn extract_page(&self, page_number: u32) -> Result<PageContent> {
            if page_number == 2 {
                return Err(SeitenwerkError::PageExtraction {
                    page: 2,
                    reason: "corrupt content stream".into(),
                });
            }
            Ok(text_page(page_number, &prose("readable")))
        }
    }

    #[tokio::test]
    async fn extraction_failure_aborts_the_run() {
        let mut seen = Vec::new();
        let err = organizer()
            .analyze(&DamagedSource, &mut |p: u8, _: &str| seen.push(p))
            .await
            .unwrap_err();
        assert!(matches!(err, SeitenwerkError::PageExtraction { page: 2, .. }));
        assert_eq!(seen.last(), Some(&26));
    }

    #[tokio::test]
    async fn mismatched_page_numbers_are_rejected() {
        let source = MemoryPageSource::new(vec![text_page(7, &prose("misnumbered"))]);
        let err = organizer().analyze(&source, &mut NoProgress).await.unwrap_err();
        assert!(matches!(err, SeitenwerkError::PageExtraction { page: 1, .. }));
    }

    #[tokio::test]
    async fn cancellation_stops_between_pages() {
        let flag = CancelFlag::new();
        let canceller = flag.clone();
        let mut sink = move |percent: u8, _: &str| {
            if percent >= 16 {
                canceller.cancel();
            }
        };
        let err = organizer()
            .analyze_with_cancel(&five_page_document(), &mut sink, &flag)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SeitenwerkError::Cancelled {
                pages_done: 1,
                total: 5
            }
        ));
    }

    #[tokio::test]
    async fn chapters_span_until_the_next_start() {
        let chapter = |n: u32, title: &str| {
            let mut page = body_page(n, &["Body text line one", "Body text line two", "Body text line three"]);
            page.runs.insert(0, TextRun::new(title, 72.0, 740.0, 24.0, 200.0));
            page.text = format!("{title}\n{}", page.text);
            page
        };
        let filler = |n: u32| body_page(n, &["Continuing the discussion from before", "with more words"]);
        let source = MemoryPageSource::new(vec![
            filler(1),
            chapter(2, "Chapter 1: Origins"),
            filler(3),
            chapter(4, "Chapter 2: Growth"),
            filler(5),
            filler(6),
        ]);

        let analysis = organizer().analyze(&source, &mut NoProgress).await.unwrap();
        assert_eq!(
            analysis.chapters,
            vec![
                ChapterInfo {
                    title: "Chapter 1: Origins".into(),
                    start_page: 2,
                    end_page: Some(3),
                },
                ChapterInfo {
                    title: "Chapter 2: Growth".into(),
                    start_page: 4,
                    end_page: None,
                },
            ]
        );
    }

    fn stub(page_number: u32, hash: &str, is_blank: bool) -> PageAnalysis {
        let classifier = organizer();
        let mut page = classifier.classifier().classify(&text_page(page_number, &prose("stub")));
        page.content_hash = hash.to_owned();
        page.is_blank = is_blank;
        page
    }

    #[test]
    fn duplicate_groups_are_disjoint_and_ordered() {
        let pages = vec![
            stub(1, "a", false),
            stub(2, "b", false),
            stub(3, "a", false),
            stub(4, "b", false),
            stub(5, "a", false),
            stub(6, "c", false),
        ];
        let groups = find_duplicate_groups(&pages);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].pages, vec![1, 3, 5]);
        assert_eq!(groups[1].pages, vec![2, 4]);

        let mut seen = HashSet::new();
        for group in &groups {
            assert!(group.pages.len() >= 2);
            assert!(group.pages.windows(2).all(|w| w[0] < w[1]));
            for page in &group.pages {
                assert!(seen.insert(*page), "page {page} in two groups");
            }
        }
    }

    #[test]
    fn blank_pages_never_join_groups() {
        let pages = vec![stub(1, "a", true), stub(2, "a", false), stub(3, "a", true)];
        assert!(find_duplicate_groups(&pages).is_empty());
    }

    #[test]
    fn textless_image_pages_are_not_duplicates() {
        let mut a = stub(1, "same", false);
        let mut b = stub(2, "same", false);
        a.text_length = 0;
        b.text_length = 0;
        assert!(find_duplicate_groups(&[a, b]).is_empty());
    }

    #[test]
    fn issue_count_formula() {
        let groups = vec![
            DuplicatePageGroup {
                pages: vec![1, 2, 3],
                similarity: 1.0,
            },
            DuplicatePageGroup {
                pages: vec![5, 9],
                similarity: 1.0,
            },
        ];
        assert_eq!(count_issues(&[4, 7], &groups, &[8]), 2 + 3 + 1);
    }
}
