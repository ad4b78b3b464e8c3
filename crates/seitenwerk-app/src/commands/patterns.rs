// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `seitenwerk patterns`: dump the built-in pattern table, a starting point
// for a custom `--patterns` file.

use seitenwerk_analysis::PatternTable;
use seitenwerk_core::error::Result;

pub fn run() -> Result<()> {
    println!("{}", PatternTable::builtin().to_json_pretty()?);
    Ok(())
}
