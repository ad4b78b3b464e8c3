// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-page classifier: runs the blank, orientation, chapter and
// table-of-contents detectors over one page and fingerprints its text.
//
// Each detector is a pure function of the page's own data. The classifier
// owns its configuration and compiled pattern table; there is no shared
// global state.

pub mod blank;
pub mod chapter;
pub mod orientation;
pub mod toc;

use seitenwerk_core::error::Result;
use seitenwerk_core::{AnalysisConfig, PageAnalysis, PageContent};
use tracing::debug;

use crate::fingerprint::fingerprint;
use crate::patterns::{CompiledPatterns, PatternTable};

pub use blank::BlankVerdict;
pub use chapter::{ChapterHeading, HeadingSource};
pub use orientation::OrientationVerdict;

/// Classifies single pages.
#[derive(Debug, Clone)]
pub struct PageClassifier {
    config: AnalysisConfig,
    patterns: CompiledPatterns,
}

impl PageClassifier {
    /// Validate the configuration and compile the pattern table.
    pub fn new(config: AnalysisConfig, table: &PatternTable) -> Result<Self> {
        config.validate()?;
        let patterns = CompiledPatterns::compile(table)?;
        Ok(Self { config, patterns })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn patterns(&self) -> &CompiledPatterns {
        &self.patterns
    }

    /// Produce the `PageAnalysis` for one page.
    ///
    /// `is_cover` is always false here: cover detection needs document
    /// position and is decided by the aggregator.
    pub fn classify(&self, page: &PageContent) -> PageAnalysis {
        let config = &self.config;
        let text_length = page.text.trim().chars().count();

        let blank = blank::detect_blank(page, text_length, config, &self.patterns);
        let orientation = orientation::detect_orientation(page, config);
        let chapter = chapter::detect_chapter(page, config, &self.patterns);
        let is_toc = toc::detect_toc(&page.text, config, &self.patterns);
        let text_density = blank::raw_density(text_length, page.area())
            .map_or(0.0, |density| density.clamp(0.0, 1.0));

        debug!(
            page = page.page_number,
            text_length,
            blank = blank.is_blank,
            rotation = orientation.suggested_rotation.degrees(),
            chapter = chapter.as_ref().map(|heading| heading.title.as_str()),
            is_toc,
            "Page classified"
        );

        PageAnalysis {
            page_number: page.page_number,
            is_blank: blank.is_blank,
            blank_confidence: blank.confidence,
            text_length,
            has_images: page.has_images,
            is_chapter_start: chapter.is_some(),
            chapter_title: chapter.map(|heading| heading.title),
            is_toc,
            is_cover: false,
            needs_rotation: orientation.needs_rotation,
            suggested_rotation: orientation.suggested_rotation,
            is_landscape: orientation.is_landscape,
            text_density,
            content_hash: fingerprint(
                &page.text,
                config.fingerprint_algorithm,
                config.fingerprint_chars,
            ),
        }
    }
}
