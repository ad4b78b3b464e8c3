// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// seitenwerk-analysis: The Smart Organize engine.
//
// Classifies each page of a document (blank, rotated, chapter start, table of
// contents), clusters duplicate pages by content fingerprint, resolves chapter
// ranges and the cover page, and turns the result into advisory actions.
// Pages arrive through the `PageSource` trait; nothing here touches PDF bytes.

pub mod actions;
pub mod aggregator;
pub mod classifier;
pub mod fingerprint;
pub mod memory_source;
pub mod patterns;
pub mod progress;

#[cfg(test)]
mod test_support;

pub use actions::{english_labels, generate_actions};
pub use aggregator::SmartOrganizer;
pub use classifier::PageClassifier;
pub use memory_source::MemoryPageSource;
pub use patterns::{PatternCategory, PatternEntry, PatternTable};
pub use progress::{CancelFlag, NoProgress, ProgressSink};
