// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page tree helpers: inherited attribute lookup, reference resolution and
// page box geometry.

use lopdf::{Dictionary, Document, Object, ObjectId};
use seitenwerk_core::error::{Result, SeitenwerkError};

/// Attributes a page may inherit from its ancestors in the page tree.
pub const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against cyclic `/Parent` chains and reference loops.
const MAX_DEPTH: usize = 32;

/// US Letter, used when a page has no usable MediaBox anywhere in its tree.
pub const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Follow indirect references until a direct object is reached.
pub fn resolve<'a>(doc: &'a Document, mut object: &'a Object) -> Option<&'a Object> {
    for _ in 0..MAX_DEPTH {
        match object {
            Object::Reference(id) => object = doc.get_object(*id).ok()?,
            direct => return Some(direct),
        }
    }
    None
}

/// Resolve `object` and borrow it as a dictionary (streams yield their dict).
pub fn resolve_dict<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    match resolve(doc, object)? {
        Object::Dictionary(dict) => Some(dict),
        Object::Stream(stream) => Some(&stream.dict),
        _ => None,
    }
}

/// Look up `key` on the page, then on each ancestor `/Pages` node.
pub fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// The page's resource dictionary, inherited if necessary.
pub fn resources(doc: &Document, page_id: ObjectId) -> Option<&Dictionary> {
    resolve_dict(doc, inherited(doc, page_id, b"Resources")?)
}

/// Width and height of the page's MediaBox, ignoring `/Rotate`.
pub fn page_size(doc: &Document, page_id: ObjectId) -> Option<(f32, f32)> {
    let media_box = resolve(doc, inherited(doc, page_id, b"MediaBox")?)?;
    let corners: Vec<f32> = media_box
        .as_array()
        .ok()?
        .iter()
        .filter_map(|value| resolve(doc, value)?.as_float().ok())
        .collect();
    match corners.as_slice() {
        [x0, y0, x1, y1] => Some(((x1 - x0).abs(), (y1 - y0).abs())),
        _ => None,
    }
}

/// Object ID of the root `/Pages` node.
pub fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|err| SeitenwerkError::PdfError(format!("document has no page tree: {err}")))
}
