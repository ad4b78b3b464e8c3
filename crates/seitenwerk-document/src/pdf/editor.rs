// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF editor: applies recommended actions (remove, rotate, reorder pages) to
// an existing document using the `lopdf` crate.
//
// Page numbers passed to every operation refer to the document as it was
// loaded, so actions computed from one analysis can be applied in any order.
// Inheritable page attributes are copied onto each page at load time and the
// page tree is written back flat under the root `/Pages` node.

use std::collections::HashSet;
use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::{SmartAction, SmartActionType, SmartOrganizeAnalysis};
use tracing::{debug, info, instrument};

use super::tree;

/// Edits the page sequence of a loaded PDF.
pub struct PdfEditor {
    document: Document,
    /// Page object IDs by original page number (index 0 is page 1).
    original: Vec<ObjectId>,
    /// Current page sequence.
    order: Vec<ObjectId>,
}

impl PdfEditor {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            SeitenwerkError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;
        Self::from_document(document)
    }

    /// Create an editor from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            SeitenwerkError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;
        Self::from_document(document)
    }

    pub fn from_document(mut document: Document) -> Result<Self> {
        tree::root_pages_id(&document)?;
        let original: Vec<ObjectId> = document.get_pages().into_values().collect();
        flatten_inherited(&mut document, &original)?;
        debug!(pages = original.len(), "PDF ready for editing");

        Ok(Self {
            document,
            order: original.clone(),
            original,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Pages in the document as loaded.
    pub fn original_page_count(&self) -> u32 {
        self.original.len() as u32
    }

    /// Pages that would be written now.
    pub fn page_count(&self) -> u32 {
        self.order.len() as u32
    }

    /// Original page numbers in their current order.
    pub fn page_order(&self) -> Vec<u32> {
        self.order
            .iter()
            .filter_map(|id| self.original.iter().position(|original| original == id))
            .map(|index| index as u32 + 1)
            .collect()
    }

    fn page_id(&self, page_number: u32) -> Result<ObjectId> {
        page_number
            .checked_sub(1)
            .and_then(|index| self.original.get(index as usize))
            .copied()
            .ok_or_else(|| SeitenwerkError::PageOutOfRange {
                page: page_number,
                total: self.original_page_count(),
            })
    }

    // -- Editing --------------------------------------------------------------

    /// Drop pages from the output. Pages already removed are ignored.
    #[instrument(skip(self))]
    pub fn remove_pages(&mut self, pages: &[u32]) -> Result<()> {
        let doomed = pages
            .iter()
            .map(|page| self.page_id(*page))
            .collect::<Result<HashSet<ObjectId>>>()?;

        let before = self.order.len();
        if self.order.iter().all(|id| doomed.contains(id)) {
            return Err(SeitenwerkError::InvalidEdit(
                "removing these pages would leave the document empty".to_string(),
            ));
        }
        self.order.retain(|id| !doomed.contains(id));

        info!(removed = before - self.order.len(), remaining = self.order.len(), "Pages removed");
        Ok(())
    }

    /// Rotate a specific page by `degrees` (must be a multiple of 90),
    /// on top of its existing `/Rotate`.
    #[instrument(skip(self))]
    pub fn rotate_page(&mut self, page_number: u32, degrees: i32) -> Result<()> {
        if degrees % 90 != 0 {
            return Err(SeitenwerkError::InvalidEdit(format!(
                "rotation must be a multiple of 90, got {}",
                degrees
            )));
        }

        let page_id = self.page_id(page_number)?;
        let page = self.document.get_dictionary_mut(page_id).map_err(|err| {
            SeitenwerkError::PdfError(format!("cannot edit page {}: {}", page_number, err))
        })?;

        let existing_rotation = page
            .get(b"Rotate")
            .and_then(Object::as_i64)
            .unwrap_or(0);
        let new_rotation = (existing_rotation + i64::from(degrees)).rem_euclid(360);
        page.set("Rotate", new_rotation);

        info!(page_number, existing_rotation, new_rotation, "Page rotated");
        Ok(())
    }

    /// Move pages to the start of the document, keeping the order given.
    #[instrument(skip(self))]
    pub fn move_pages_to_front(&mut self, pages: &[u32]) -> Result<()> {
        let mut front: Vec<ObjectId> = Vec::with_capacity(pages.len());
        for page in pages {
            let id = self.page_id(*page)?;
            if self.order.contains(&id) && !front.contains(&id) {
                front.push(id);
            }
        }

        self.order.retain(|id| !front.contains(id));
        let moved = front.len();
        front.append(&mut self.order);
        self.order = front;

        info!(moved, "Pages moved to front");
        Ok(())
    }

    /// Carry out one recommended action computed from `analysis` of this
    /// document.
    #[instrument(skip_all, fields(action = %action.kind, pages = action.affected_pages.len()))]
    pub fn apply(&mut self, action: &SmartAction, analysis: &SmartOrganizeAnalysis) -> Result<()> {
        if analysis.total_pages != self.original_page_count() {
            return Err(SeitenwerkError::InvalidEdit(format!(
                "analysis covers {} pages but the document has {}",
                analysis.total_pages,
                self.original_page_count()
            )));
        }

        match action.kind {
            SmartActionType::RemoveBlank | SmartActionType::RemoveDuplicates => {
                self.remove_pages(&action.affected_pages)
            }
            SmartActionType::FixRotation => {
                for &page in &action.affected_pages {
                    let rotation = analysis
                        .page(page)
                        .ok_or_else(|| SeitenwerkError::PageOutOfRange {
                            page,
                            total: analysis.total_pages,
                        })?
                        .suggested_rotation;
                    self.rotate_page(page, i32::from(rotation.degrees()))?;
                }
                Ok(())
            }
            SmartActionType::MoveTocToFront => self.move_pages_to_front(&action.affected_pages),
            SmartActionType::GroupChapters => {
                Err(SeitenwerkError::UnsupportedAction(action.kind.to_string()))
            }
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Serialise the edited document. The editor stays usable afterwards.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut doc = self.document.clone();
        let root = tree::root_pages_id(&doc)?;

        for id in &self.order {
            if let Ok(page) = doc.get_dictionary_mut(*id) {
                page.set("Parent", Object::Reference(root));
            }
        }
        let kids: Vec<Object> = self.order.iter().map(|id| Object::Reference(*id)).collect();
        let pages = doc.get_dictionary_mut(root).map_err(|err| {
            SeitenwerkError::PdfError(format!("cannot edit page tree: {}", err))
        })?;
        pages.set("Kids", kids);
        pages.set("Count", self.order.len() as i64);

        let pruned = doc.prune_objects();
        debug!(pages = self.order.len(), pruned = pruned.len(), "Page tree rebuilt");

        let mut output = Vec::new();
        doc.save_to(&mut output).map_err(|err| {
            SeitenwerkError::PdfError(format!("failed to serialise edited PDF: {}", err))
        })?;
        Ok(output)
    }

    /// Write the edited document to `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let output = self.to_bytes()?;
        std::fs::write(path.as_ref(), &output)?;
        info!(bytes = output.len(), pages = self.order.len(), "Edited PDF written");
        Ok(())
    }
}

/// Copy attributes each page inherits from its ancestors onto the page
/// itself, so pages can be re-parented freely.
fn flatten_inherited(doc: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    for &page_id in page_ids {
        let copies: Vec<(&[u8], Object)> = tree::INHERITABLE
            .iter()
            .filter_map(|key| Some((*key, tree::inherited(doc, page_id, key)?.clone())))
            .collect();

        let page = doc.get_dictionary_mut(page_id).map_err(|err| {
            SeitenwerkError::PdfError(format!("page object {:?} unreadable: {}", page_id, err))
        })?;
        for (key, value) in copies {
            if !page.has(key) {
                page.set(key, value);
            }
        }
    }
    Ok(())
}
