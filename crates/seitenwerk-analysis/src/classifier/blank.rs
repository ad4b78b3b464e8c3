// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blank page detection.
//
// Checks run from strongest to weakest evidence: image presence vetoes
// everything, then near-empty text, then text made only of page numbers, then
// sparse text on a large page.

use seitenwerk_core::{AnalysisConfig, PageContent};

use crate::patterns::CompiledPatterns;

const CONFIDENCE_NEAR_EMPTY: f32 = 0.95;
const CONFIDENCE_PAGE_NUMBER_ONLY: f32 = 0.90;
const CONFIDENCE_SPARSE: f32 = 0.70;

/// Outcome of the blank check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlankVerdict {
    pub is_blank: bool,
    pub confidence: f32,
}

impl BlankVerdict {
    const NOT_BLANK: Self = Self {
        is_blank: false,
        confidence: 0.0,
    };

    fn blank(confidence: f32) -> Self {
        Self {
            is_blank: true,
            confidence,
        }
    }
}

/// Characters per hundred square units of page area, or `None` without geometry.
pub fn raw_density(text_length: usize, area: f32) -> Option<f32> {
    (area > 0.0).then(|| text_length as f32 / (area / 100.0))
}

pub fn detect_blank(
    page: &PageContent,
    text_length: usize,
    config: &AnalysisConfig,
    patterns: &CompiledPatterns,
) -> BlankVerdict {
    if page.has_images {
        return BlankVerdict::NOT_BLANK;
    }

    if text_length < config.blank_min_chars {
        return BlankVerdict::blank(CONFIDENCE_NEAR_EMPTY);
    }

    let has_meaningful_line = page
        .text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .any(|line| !patterns.is_page_number(line));
    if !has_meaningful_line {
        return BlankVerdict::blank(CONFIDENCE_PAGE_NUMBER_ONLY);
    }

    match raw_density(text_length, page.area()) {
        Some(density)
            if density < config.sparse_density_threshold
                && text_length < config.sparse_max_chars =>
        {
            BlankVerdict::blank(CONFIDENCE_SPARSE)
        }
        _ => BlankVerdict::NOT_BLANK,
    }
}
