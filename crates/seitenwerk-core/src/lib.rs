// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Seitenwerk: Core types, configuration and error definitions shared across
// all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod source;
pub mod types;

pub use config::{AnalysisConfig, FingerprintAlgorithm};
pub use error::SeitenwerkError;
pub use source::PageSource;
pub use types::*;
