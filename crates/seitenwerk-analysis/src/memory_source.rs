// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory page source for pre-extracted pages.

use std::future::{Future, ready};

use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::{PageContent, PageSource};

/// Serves pages that were extracted elsewhere (a JSON dump, a test fixture,
/// a remote renderer's response).
#[derive(Debug, Clone, Default)]
pub struct MemoryPageSource {
    pages: Vec<PageContent>,
}

impl MemoryPageSource {
    /// Pages are served in vector order; page `n` is `pages[n - 1]`.
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[PageContent] {
        &self.pages
    }
}

impl PageSource for MemoryPageSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_page(&self, page_number: u32) -> impl Future<Output = Result<PageContent>> + Send {
        let page = page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .cloned()
            .ok_or_else(|| SeitenwerkError::PageOutOfRange {
                page: page_number,
                total: self.page_count(),
            });
        ready(page)
    }
}
