// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: page extraction for analysis, and page-level editing.

pub mod content;
pub mod editor;
pub mod source;
pub mod tree;

#[cfg(test)]
pub(crate) mod fixtures;

pub use editor::PdfEditor;
pub use source::PdfPageSource;
