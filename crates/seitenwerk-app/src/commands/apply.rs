// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `seitenwerk apply`: analyse, then write a copy with the recommended
// actions carried out.

use std::path::Path;

use seitenwerk_analysis::{english_labels, generate_actions};
use seitenwerk_core::error::Result;
use seitenwerk_core::{SmartAction, SmartActionType};
use seitenwerk_document::{PdfEditor, PdfPageSource};
use tracing::{info, instrument};

use super::{AnalysisArgs, progress_logger};

/// Keep the actions whose type was asked for; an empty selection keeps all.
pub fn select_actions(actions: Vec<SmartAction>, selected: &[SmartActionType]) -> Vec<SmartAction> {
    actions
        .into_iter()
        .filter(|action| selected.is_empty() || selected.contains(&action.kind))
        .collect()
}

#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub async fn run(
    input: &Path,
    output: &Path,
    selected: &[SmartActionType],
    args: &AnalysisArgs,
) -> Result<()> {
    let organizer = args.organizer()?;
    let source = PdfPageSource::open(input)?;
    let analysis = organizer.analyze(&source, &mut progress_logger()).await?;
    let actions = select_actions(generate_actions(&analysis, english_labels), selected);

    let mut editor = PdfEditor::from_document(source.document().clone())?;
    for action in &actions {
        editor.apply(action, &analysis)?;
        println!("{} ({} pages)", action.label, action.affected_pages.len());
    }
    editor.save(output)?;

    info!(
        applied = actions.len(),
        pages_before = editor.original_page_count(),
        pages_after = editor.page_count(),
        "Document written"
    );
    if actions.is_empty() {
        println!("Nothing to change; wrote an unmodified copy to {}", output.display());
    } else {
        println!(
            "Wrote {} ({} of {} pages kept)",
            output.display(),
            editor.page_count(),
            editor.original_page_count()
        );
    }
    Ok(())
}
