// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Smart action recommendations derived from a finished analysis.
//
// Labels and descriptions are looked up through a caller-supplied translate
// function, so the host application owns localisation. `english_labels` is
// the built-in fallback.

use seitenwerk_core::{SmartAction, SmartActionType, SmartOrganizeAnalysis};

/// A table of contents found after this page is worth moving forward.
const TOC_FRONT_LIMIT: u32 = 2;

fn label_key(kind: SmartActionType) -> String {
    format!("actions.{kind}.label")
}

fn description_key(kind: SmartActionType) -> String {
    format!("actions.{kind}.description")
}

fn icon(kind: SmartActionType) -> &'static str {
    match kind {
        SmartActionType::RemoveBlank => "trash",
        SmartActionType::RemoveDuplicates => "copy",
        SmartActionType::FixRotation => "rotate-cw",
        SmartActionType::MoveTocToFront => "list",
        SmartActionType::GroupChapters => "book-open",
    }
}

fn action(
    kind: SmartActionType,
    affected_pages: Vec<u32>,
    translate: &impl Fn(&str) -> String,
) -> SmartAction {
    let count = affected_pages.len().to_string();
    SmartAction {
        kind,
        label: translate(&label_key(kind)).replace("{count}", &count),
        description: translate(&description_key(kind)).replace("{count}", &count),
        affected_pages,
        icon: icon(kind).to_owned(),
    }
}

/// Recommend actions for an analysis.
///
/// Order is fixed: remove blanks, remove duplicates, fix rotation, move the
/// table of contents. Actions with nothing to do are omitted. Chapter
/// grouping is never recommended here.
pub fn generate_actions(
    analysis: &SmartOrganizeAnalysis,
    translate: impl Fn(&str) -> String,
) -> Vec<SmartAction> {
    let mut actions = Vec::new();

    if !analysis.blank_pages.is_empty() {
        actions.push(action(
            SmartActionType::RemoveBlank,
            analysis.blank_pages.clone(),
            &translate,
        ));
    }

    let duplicates: Vec<u32> = analysis
        .duplicate_groups
        .iter()
        .flat_map(|group| group.pages.iter().skip(1).copied())
        .collect();
    if !duplicates.is_empty() {
        actions.push(action(
            SmartActionType::RemoveDuplicates,
            duplicates,
            &translate,
        ));
    }

    if !analysis.rotation_needed.is_empty() {
        actions.push(action(
            SmartActionType::FixRotation,
            analysis.rotation_needed.clone(),
            &translate,
        ));
    }

    let toc_is_late = analysis
        .toc_pages
        .iter()
        .min()
        .is_some_and(|first| *first > TOC_FRONT_LIMIT);
    if toc_is_late {
        actions.push(action(
            SmartActionType::MoveTocToFront,
            analysis.toc_pages.clone(),
            &translate,
        ));
    }

    actions
}

/// English labels for every action key; unknown keys are returned unchanged.
pub fn english_labels(key: &str) -> String {
    let text = match key {
        "actions.remove-blank.label" => "Remove blank pages",
        "actions.remove-blank.description" => "Delete {count} pages with no meaningful content",
        "actions.remove-duplicates.label" => "Remove duplicate pages",
        "actions.remove-duplicates.description" => {
            "Delete {count} pages that repeat an earlier page"
        }
        "actions.fix-rotation.label" => "Fix page rotation",
        "actions.fix-rotation.description" => "Rotate {count} sideways pages upright",
        "actions.move-toc-to-front.label" => "Move table of contents to front",
        "actions.move-toc-to-front.description" => {
            "Move {count} table of contents pages to the start of the document"
        }
        "actions.group-chapters.label" => "Group chapters",
        "actions.group-chapters.description" => "Organise pages into {count} chapters",
        other => other,
    };
    text.to_owned()
}
