// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `seitenwerk analyze`: report structure and recommended actions.

use std::path::Path;

use seitenwerk_analysis::{english_labels, generate_actions};
use seitenwerk_core::error::Result;
use seitenwerk_document::PdfPageSource;
use tracing::instrument;

use super::{AnalysisArgs, progress_logger};
use crate::report::{JsonReport, Summary};

#[instrument(skip_all, fields(input = %input.display()))]
pub async fn run(input: &Path, json: bool, args: &AnalysisArgs) -> Result<()> {
    let organizer = args.organizer()?;
    let source = PdfPageSource::open(input)?;
    let analysis = organizer.analyze(&source, &mut progress_logger()).await?;
    let actions = generate_actions(&analysis, english_labels);

    if json {
        println!("{}", JsonReport::new(&analysis, &actions).to_json()?);
    } else {
        print!("{}", Summary::new(&analysis, &actions));
    }
    Ok(())
}
