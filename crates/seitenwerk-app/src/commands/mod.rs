// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command implementations. Each command returns a `SeitenwerkError` on
// failure; `main` turns it into a human-readable message.

pub mod analyze;
pub mod apply;
pub mod patterns;

use std::path::PathBuf;

use clap::Args;
use seitenwerk_analysis::SmartOrganizer;
use seitenwerk_core::error::Result;
use tracing::info;

use crate::settings;

/// Options shared by every command that runs an analysis.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Analysis thresholds as JSON (default: $XDG_CONFIG_HOME/seitenwerk/config.json)
    #[arg(long, env = "SEITENWERK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Additional heading and table-of-contents patterns as JSON
    #[arg(long)]
    pub patterns: Option<PathBuf>,

    /// Use only the patterns from --patterns
    #[arg(long, requires = "patterns")]
    pub no_builtin_patterns: bool,
}

impl AnalysisArgs {
    pub fn organizer(&self) -> Result<SmartOrganizer> {
        let config = settings::load_config(self.config.as_deref())?;
        let table = settings::load_patterns(self.patterns.as_deref(), !self.no_builtin_patterns)?;
        SmartOrganizer::new(config, &table)
    }
}

/// Forwards engine progress to the log.
pub fn progress_logger() -> impl FnMut(u8, &str) {
    |percent: u8, message: &str| info!(percent, "{message}")
}
