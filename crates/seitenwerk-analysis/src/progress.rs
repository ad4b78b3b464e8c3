// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Progress reporting and cooperative cancellation for analysis runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Receives progress updates. Percentages never decrease within a run and the
/// final call is always 100.
pub trait ProgressSink {
    fn report(&mut self, percent: u8, message: &str);
}

impl<F> ProgressSink for F
where
    F: FnMut(u8, &str),
{
    fn report(&mut self, percent: u8, message: &str) {
        self(percent, message)
    }
}

/// Discards all progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8, _message: &str) {}
}

/// Shared flag checked between pages. Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
