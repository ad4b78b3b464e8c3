// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Orientation detection from the shape of the text block.
//
// Upright text on a landscape page spreads wider than tall; when the text box
// is instead much taller than wide, the page was most likely scanned or
// placed sideways.

use seitenwerk_core::{AnalysisConfig, PageContent, Rotation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationVerdict {
    pub needs_rotation: bool,
    pub suggested_rotation: Rotation,
    pub is_landscape: bool,
}

impl OrientationVerdict {
    fn upright(is_landscape: bool) -> Self {
        Self {
            needs_rotation: false,
            suggested_rotation: Rotation::None,
            is_landscape,
        }
    }

    fn rotate(rotation: Rotation, is_landscape: bool) -> Self {
        Self {
            needs_rotation: true,
            suggested_rotation: rotation,
            is_landscape,
        }
    }
}

/// Axis-aligned box around run origins, extended by run widths.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextBox {
    width: f32,
    height: f32,
}

fn text_box(page: &PageContent) -> Option<TextBox> {
    let mut runs = page.runs.iter().filter(|run| !run.text.trim().is_empty());
    let first = runs.next()?;
    let (mut min_x, mut max_x) = (first.x, first.x + first.width);
    let (mut min_y, mut max_y) = (first.y, first.y);

    for run in runs {
        min_x = min_x.min(run.x);
        max_x = max_x.max(run.x + run.width);
        min_y = min_y.min(run.y);
        max_y = max_y.max(run.y);
    }

    Some(TextBox {
        width: max_x - min_x,
        height: max_y - min_y,
    })
}

pub fn detect_orientation(page: &PageContent, config: &AnalysisConfig) -> OrientationVerdict {
    let is_landscape = page.is_landscape();
    let run_count = page
        .runs
        .iter()
        .filter(|run| !run.text.trim().is_empty())
        .count();

    if run_count < config.orientation_min_runs {
        return OrientationVerdict::upright(is_landscape);
    }
    let Some(bounds) = text_box(page) else {
        return OrientationVerdict::upright(is_landscape);
    };

    let factor = config.rotation_aspect_factor;
    if is_landscape && bounds.height > factor * bounds.width {
        OrientationVerdict::rotate(Rotation::Quarter, is_landscape)
    } else if !is_landscape
        && run_count > config.portrait_min_runs
        && bounds.width > factor * bounds.height
    {
        OrientationVerdict::rotate(Rotation::ThreeQuarter, is_landscape)
    } else {
        OrientationVerdict::upright(is_landscape)
    }
}
