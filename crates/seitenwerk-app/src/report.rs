// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Terminal and JSON rendering of analysis results and errors.

use std::fmt;

use serde::Serialize;
use seitenwerk_core::error::Result;
use seitenwerk_core::human_errors::humanize_error;
use seitenwerk_core::{SeitenwerkError, SmartAction, SmartOrganizeAnalysis};

/// `1, 3, 7` or `-` for an empty list.
fn page_list(pages: &[u32]) -> String {
    if pages.is_empty() {
        return "-".to_string();
    }
    pages
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable summary for the terminal.
pub struct Summary<'a> {
    analysis: &'a SmartOrganizeAnalysis,
    actions: &'a [SmartAction],
}

impl<'a> Summary<'a> {
    pub fn new(analysis: &'a SmartOrganizeAnalysis, actions: &'a [SmartAction]) -> Self {
        Self { analysis, actions }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analysis;
        writeln!(
            f,
            "Analyzed {} pages in {} ms, {} issues found",
            a.total_pages, a.analysis_time_ms, a.issues_count
        )?;
        writeln!(f, "  Blank pages:       {}", page_list(&a.blank_pages))?;
        for group in &a.duplicate_groups {
            writeln!(f, "  Duplicate pages:   {}", page_list(&group.pages))?;
        }
        if !a.rotation_needed.is_empty() {
            let rotations: Vec<String> = a
                .rotation_needed
                .iter()
                .map(|page| match a.page(*page) {
                    Some(p) => format!("{page} ({}°)", p.suggested_rotation.degrees()),
                    None => page.to_string(),
                })
                .collect();
            writeln!(f, "  Needs rotation:    {}", rotations.join(", "))?;
        }
        writeln!(f, "  Contents pages:    {}", page_list(&a.toc_pages))?;
        match a.cover_page {
            Some(page) => writeln!(f, "  Cover page:        {page}")?,
            None => writeln!(f, "  Cover page:        -")?,
        }

        if !a.chapters.is_empty() {
            writeln!(f, "Chapters:")?;
            for chapter in &a.chapters {
                let end = chapter
                    .end_page
                    .map_or_else(|| "end".to_string(), |page| page.to_string());
                writeln!(f, "  p.{}-{}  {}", chapter.start_page, end, chapter.title)?;
            }
        }

        if self.actions.is_empty() {
            writeln!(f, "No actions recommended.")?;
        } else {
            writeln!(f, "Recommended actions:")?;
            for action in self.actions {
                writeln!(
                    f,
                    "  [{}] {}: {} (pages {})",
                    action.kind,
                    action.label,
                    action.description,
                    page_list(&action.affected_pages)
                )?;
            }
        }
        Ok(())
    }
}

/// The `--json` document: the aggregate plus its recommended actions.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    analysis: &'a SmartOrganizeAnalysis,
    actions: &'a [SmartAction],
}

impl<'a> JsonReport<'a> {
    pub fn new(analysis: &'a SmartOrganizeAnalysis, actions: &'a [SmartAction]) -> Self {
        Self { analysis, actions }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Plain-language error block for stderr.
pub struct ErrorReport<'a>(pub &'a SeitenwerkError);

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let human = humanize_error(self.0);
        writeln!(f, "Error: {}", human.message)?;
        writeln!(f, "  {}", human.suggestion)?;
        if human.retriable {
            writeln!(f, "  Running the command again may succeed.")?;
        }
        writeln!(f, "  Details: {}", self.0)
    }
}
