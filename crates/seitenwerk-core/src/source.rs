// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The page source port. The analysis engine only ever sees pages through this
// trait, so a PDF decoder, a test fixture or a remote renderer can all feed it.

use std::future::Future;

use crate::error::Result;
use crate::types::PageContent;

/// Supplies extracted text, run geometry and image presence for each page.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Extract a single page (1-indexed).
    ///
    /// An error here is fatal for the whole analysis run; implementations
    /// must not paper over unreadable pages with empty content.
    fn extract_page(&self, page_number: u32) -> impl Future<Output = Result<PageContent>> + Send;
}
