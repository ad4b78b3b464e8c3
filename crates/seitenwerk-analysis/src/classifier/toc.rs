// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Table-of-contents detection: either a "Contents"-style title line, or the
// structural signature of many lines ending in page numbers with at least one
// dot-leader (or widely spaced) entry.

use seitenwerk_core::AnalysisConfig;

use crate::patterns::CompiledPatterns;

/// Whether a line ends in a bare page number preceded by other text.
fn ends_with_page_number(line: &str) -> bool {
    let trimmed = line.trim_end();
    let digits = trimmed
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .count();
    if digits == 0 || digits == trimmed.len() {
        return false;
    }
    let prefix = &trimmed[..trimmed.len() - digits];
    prefix.ends_with(|c: char| c.is_whitespace() || c == '.' || c == '…' || c == '·')
        && !prefix.trim().is_empty()
}

pub fn detect_toc(text: &str, config: &AnalysisConfig, patterns: &CompiledPatterns) -> bool {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.iter().any(|line| patterns.is_toc_title(line)) {
        return true;
    }

    let numbered = lines.iter().filter(|line| ends_with_page_number(line)).count();
    numbered > config.toc_min_numbered_lines && lines.iter().any(|line| patterns.is_toc_entry(line))
}
