// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic page builders shared by the unit tests.

use seitenwerk_core::{PageContent, TextRun};

pub const LETTER_WIDTH: f32 = 612.0;
pub const LETTER_HEIGHT: f32 = 792.0;

/// A portrait US-Letter page with the given text and no runs.
pub fn text_page(page_number: u32, text: &str) -> PageContent {
    PageContent {
        page_number,
        text: text.to_owned(),
        runs: Vec::new(),
        width: LETTER_WIDTH,
        height: LETTER_HEIGHT,
        has_images: false,
    }
}

/// A page whose text is a set of 11pt body lines stacked from the top.
pub fn body_page(page_number: u32, lines: &[&str]) -> PageContent {
    let runs = lines
        .iter()
        .enumerate()
        .map(|(index, line)| body_run(line, 720.0 - index as f32 * 14.0))
        .collect();
    PageContent {
        runs,
        ..text_page(page_number, &lines.join("\n"))
    }
}

/// An 11pt run at the left margin.
pub fn body_run(text: &str, y: f32) -> TextRun {
    TextRun::new(text, 72.0, y, 11.0, text.chars().count() as f32 * 5.5)
}
