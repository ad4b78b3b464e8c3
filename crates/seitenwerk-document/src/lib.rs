// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// seitenwerk-document: PDF plumbing for Seitenwerk.
//
// Provides the lopdf-backed page source the analysis engine reads from (text
// runs, page geometry, image presence) and an editor that applies recommended
// actions (remove, rotate, reorder pages) to the original file.

pub mod pdf;

// Re-export the primary structs so callers can use `seitenwerk_document::PdfPageSource` etc.
pub use pdf::editor::PdfEditor;
pub use pdf::source::PdfPageSource;
