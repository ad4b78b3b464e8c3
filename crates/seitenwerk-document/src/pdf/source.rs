// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF page source: feeds pages of an existing PDF to the analysis engine
// using the `lopdf` crate.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use lopdf::{Document, ObjectId};
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::{PageContent, PageSource};
use tracing::{debug, info, instrument};

use super::content::extract_page_content;

/// Reads pages out of a loaded PDF.
///
/// The document is shared behind an `Arc` so each page can be decoded on the
/// blocking thread pool without copying it.
pub struct PdfPageSource {
    document: Arc<Document>,
    /// Page object IDs in page order.
    page_ids: Vec<ObjectId>,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfPageSource {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            SeitenwerkError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        let mut source = Self::from_document(document);
        source.source_path = Some(path_ref.display().to_string());
        Ok(source)
    }

    /// Create a source from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            SeitenwerkError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;
        Ok(Self::from_document(document))
    }

    pub fn from_document(document: Document) -> Self {
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        debug!(pages = page_ids.len(), "PDF loaded");
        Self {
            document: Arc::new(document),
            page_ids,
            source_path: None,
        }
    }

    // -- Inspection -----------------------------------------------------------

    /// Return the source path if the source was created via [`PdfPageSource::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl PageSource for PdfPageSource {
    fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    fn extract_page(&self, page_number: u32) -> impl Future<Output = Result<PageContent>> + Send {
        let document = Arc::clone(&self.document);
        let page_id = page_number
            .checked_sub(1)
            .and_then(|index| self.page_ids.get(index as usize))
            .copied()
            .ok_or_else(|| SeitenwerkError::PageOutOfRange {
                page: page_number,
                total: self.page_count(),
            });

        async move {
            let page_id = page_id?;
            tokio::task::spawn_blocking(move || {
                extract_page_content(&document, page_id, page_number)
            })
            .await
            .map_err(|err| SeitenwerkError::PageExtraction {
                page: page_number,
                reason: format!("extraction task failed: {err}"),
            })?
        }
    }
}
