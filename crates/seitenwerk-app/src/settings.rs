// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Configuration and pattern table resolution for the command line.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use seitenwerk_analysis::PatternTable;
use seitenwerk_core::AnalysisConfig;
use seitenwerk_core::error::Result;
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.json";

/// `$XDG_CONFIG_HOME/seitenwerk`, falling back to `~/.config/seitenwerk`.
pub fn config_dir() -> Option<PathBuf> {
    config_dir_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn config_dir_from(xdg: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = match xdg.filter(|value| !value.is_empty()) {
        Some(xdg) => PathBuf::from(xdg),
        None => PathBuf::from(home.filter(|value| !value.is_empty())?).join(".config"),
    };
    Some(base.join("seitenwerk"))
}

/// Load analysis thresholds.
///
/// An explicit path must exist. Without one, the default location is tried
/// and a missing file means built-in defaults; a malformed file is an error
/// either way.
pub fn load_config(explicit: Option<&Path>) -> Result<AnalysisConfig> {
    if let Some(path) = explicit {
        info!(path = %path.display(), "Loading analysis config");
        return AnalysisConfig::load(path);
    }
    load_default_config(config_dir().map(|dir| dir.join(CONFIG_FILE)))
}

fn load_default_config(path: Option<PathBuf>) -> Result<AnalysisConfig> {
    match path {
        Some(path) if path.is_file() => {
            info!(path = %path.display(), "Loading analysis config");
            AnalysisConfig::load(&path)
        }
        _ => {
            debug!("No config file, using defaults");
            Ok(AnalysisConfig::default())
        }
    }
}

/// The built-in pattern table, extended by (or replaced with) a user file.
pub fn load_patterns(extra: Option<&Path>, builtin: bool) -> Result<PatternTable> {
    let mut table = if builtin {
        PatternTable::builtin()
    } else {
        PatternTable {
            entries: Vec::new(),
            ..PatternTable::builtin()
        }
    };
    if let Some(path) = extra {
        let user = PatternTable::load(path)?;
        if builtin {
            table.extend(user);
        } else {
            table = user;
        }
    }
    Ok(table)
}
