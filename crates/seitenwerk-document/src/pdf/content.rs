// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content stream walker: turns a page's drawing operators into positioned
// text runs and an image-presence flag.
//
// Only the state the detectors need is tracked: the CTM stack, the text and
// line matrices, the current font, font size, leading and horizontal
// scaling. Strings are decoded through the font's `/Encoding` or
// `/ToUnicode` map. Glyph widths are not read from font programs; each glyph
// advances half an em.

use std::collections::{HashMap, HashSet};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Encoding, Object, ObjectId};
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::{PageContent, TextRun};
use tracing::{debug, trace, warn};

use super::tree;

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE_EM: f32 = 0.5;

/// `TJ` adjustments below this (thousandths of an em) are word gaps.
const WORD_GAP: f32 = -200.0;

/// A horizontal gap wider than this fraction of the font size between two
/// runs on one line becomes a space.
const SPACE_GAP_EM: f32 = 0.15;

// -- Matrices -----------------------------------------------------------------

/// Affine transform `[a b c d e f]` as used by PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        let [a, b, c, d, e, f] = numbers::<6>(operands)?;
        Some(Self { a, b, c, d, e, f })
    }

    /// `self × other`: apply `self` first, then `other`.
    fn multiply(self, other: Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn horizontal_scale(&self) -> f32 {
        self.a.hypot(self.b)
    }

    fn vertical_scale(&self) -> f32 {
        self.c.hypot(self.d)
    }
}

fn numbers<const N: usize>(operands: &[Object]) -> Option<[f32; N]> {
    if operands.len() < N {
        return None;
    }
    let mut values = [0.0; N];
    for (slot, operand) in values.iter_mut().zip(operands) {
        *slot = operand.as_float().ok()?;
    }
    Some(values)
}

// -- Strings ------------------------------------------------------------------

/// Decode a string shown with a font that has no usable encoding: UTF-16BE
/// behind a byte-order mark, Latin-1 otherwise.
fn decode_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().copied().map(char::from).collect(),
    }
}

// -- Page resources -----------------------------------------------------------

/// The resources a content stream refers to by name.
#[derive(Debug, Default)]
pub struct PageResources<'a> {
    /// Text encodings keyed by font resource name.
    pub fonts: HashMap<Vec<u8>, Encoding<'a>>,
    /// XObject names that paint an image.
    pub image_names: HashSet<Vec<u8>>,
}

impl<'a> PageResources<'a> {
    pub fn load(doc: &'a Document, page_id: ObjectId) -> Self {
        Self {
            fonts: font_encodings(doc, page_id),
            image_names: image_xobject_names(doc, page_id),
        }
    }

    /// Decode the bytes of a shown string with `font`'s encoding.
    fn decode(&self, font: Option<&[u8]>, bytes: &[u8]) -> String {
        font.and_then(|name| self.fonts.get(name))
            .and_then(|encoding| Document::decode_text(encoding, bytes).ok())
            .unwrap_or_else(|| decode_string(bytes))
    }
}

fn font_encodings(doc: &Document, page_id: ObjectId) -> HashMap<Vec<u8>, Encoding<'_>> {
    let Some(fonts) = tree::resources(doc, page_id)
        .and_then(|resources| resources.get(b"Font").ok())
        .and_then(|fonts| tree::resolve_dict(doc, fonts))
    else {
        return HashMap::new();
    };
    fonts
        .iter()
        .filter_map(|(name, font)| {
            let encoding = tree::resolve_dict(doc, font)?.get_font_encoding(doc);
            match encoding {
                Ok(encoding) => Some((name.clone(), encoding)),
                Err(err) => {
                    debug!(
                        font = %String::from_utf8_lossy(name),
                        %err,
                        "Font has no usable encoding"
                    );
                    None
                }
            }
        })
        .collect()
}

// -- Text state ---------------------------------------------------------------

#[derive(Debug, Clone)]
struct TextState {
    matrix: Matrix,
    line_matrix: Matrix,
    /// Resource name selected by `Tf`.
    font: Option<Vec<u8>>,
    font_size: f32,
    leading: f32,
    horizontal_scaling: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            font: None,
            font_size: 0.0,
            leading: 0.0,
            horizontal_scaling: 1.0,
        }
    }
}

impl TextState {
    fn begin(&mut self) {
        self.matrix = Matrix::IDENTITY;
        self.line_matrix = Matrix::IDENTITY;
    }

    fn set_matrix(&mut self, matrix: Matrix) {
        self.matrix = matrix;
        self.line_matrix = matrix;
    }

    fn next_line(&mut self, tx: f32, ty: f32) {
        self.set_matrix(Matrix::translation(tx, ty).multiply(self.line_matrix));
    }

    /// Move along the baseline by `advance` unscaled text-space units.
    fn advance(&mut self, advance: f32) {
        self.matrix = Matrix::translation(advance, 0.0).multiply(self.matrix);
    }

    fn glyph_advance(&self, glyphs: usize) -> f32 {
        glyphs as f32 * GLYPH_ADVANCE_EM * self.font_size * self.horizontal_scaling
    }
}

// -- Walker -------------------------------------------------------------------

/// What a page's content stream paints.
#[derive(Debug, Default)]
pub struct PageScan {
    pub runs: Vec<TextRun>,
    pub has_images: bool,
}

impl PageScan {
    fn show(&mut self, text: &mut TextState, ctm: Matrix, shown: &str) {
        let glyphs = shown.chars().count();
        if glyphs == 0 {
            return;
        }
        let advance = text.glyph_advance(glyphs);
        let rendering = text.matrix.multiply(ctm);
        if !shown.trim().is_empty() {
            self.runs.push(TextRun::new(
                shown,
                rendering.e,
                rendering.f,
                text.font_size * rendering.vertical_scale(),
                advance * rendering.horizontal_scale(),
            ));
        }
        text.advance(advance);
    }

    /// `TJ`: strings interleaved with kerning adjustments.
    fn show_array(
        &mut self,
        text: &mut TextState,
        ctm: Matrix,
        elements: &[Object],
        resources: &PageResources<'_>,
    ) {
        let mut shown = String::new();
        let mut kerning = 0.0;
        for element in elements {
            match element {
                Object::String(bytes, _) => {
                    shown.push_str(&resources.decode(text.font.as_deref(), bytes));
                }
                other => {
                    if let Ok(adjustment) = other.as_float() {
                        if adjustment < WORD_GAP && !shown.ends_with(' ') {
                            shown.push(' ');
                        }
                        kerning -= adjustment / 1000.0 * text.font_size * text.horizontal_scaling;
                    }
                }
            }
        }
        self.show(text, ctm, &shown);
        text.advance(kerning);
    }
}

fn string_operand(
    operands: &[Object],
    index: usize,
    text: &TextState,
    resources: &PageResources<'_>,
) -> Option<String> {
    operands
        .get(index)
        .and_then(|operand| operand.as_str().ok())
        .map(|bytes| resources.decode(text.font.as_deref(), bytes))
}

/// Walk decoded operators, resolving font and XObject names in `resources`.
pub fn scan_operations(operations: &[Operation], resources: &PageResources<'_>) -> PageScan {
    let mut scan = PageScan::default();
    let mut ctm = Matrix::IDENTITY;
    let mut saved: Vec<Matrix> = Vec::new();
    let mut text = TextState::default();

    for operation in operations {
        let operands = operation.operands.as_slice();
        match operation.operator.as_str() {
            "q" => saved.push(ctm),
            "Q" => {
                if let Some(previous) = saved.pop() {
                    ctm = previous;
                }
            }
            "cm" => {
                if let Some(matrix) = Matrix::from_operands(operands) {
                    ctm = matrix.multiply(ctm);
                }
            }
            "BT" => text.begin(),
            "Tf" => {
                if let Some(name) = operands.first().and_then(|name| name.as_name().ok()) {
                    text.font = Some(name.to_vec());
                }
                if let Some(size) = operands.get(1).and_then(|size| size.as_float().ok()) {
                    text.font_size = size;
                }
            }
            "TL" => {
                if let Some([leading]) = numbers::<1>(operands) {
                    text.leading = leading;
                }
            }
            "Tz" => {
                if let Some([scale]) = numbers::<1>(operands) {
                    text.horizontal_scaling = scale / 100.0;
                }
            }
            "Td" => {
                if let Some([tx, ty]) = numbers::<2>(operands) {
                    text.next_line(tx, ty);
                }
            }
            "TD" => {
                if let Some([tx, ty]) = numbers::<2>(operands) {
                    text.leading = -ty;
                    text.next_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(matrix) = Matrix::from_operands(operands) {
                    text.set_matrix(matrix);
                }
            }
            "T*" => text.next_line(0.0, -text.leading),
            "Tj" => {
                if let Some(shown) = string_operand(operands, 0, &text, resources) {
                    scan.show(&mut text, ctm, &shown);
                }
            }
            "'" => {
                text.next_line(0.0, -text.leading);
                if let Some(shown) = string_operand(operands, 0, &text, resources) {
                    scan.show(&mut text, ctm, &shown);
                }
            }
            "\"" => {
                text.next_line(0.0, -text.leading);
                if let Some(shown) = string_operand(operands, 2, &text, resources) {
                    scan.show(&mut text, ctm, &shown);
                }
            }
            "TJ" => {
                if let Some(elements) = operands.first().and_then(|array| array.as_array().ok()) {
                    scan.show_array(&mut text, ctm, elements, resources);
                }
            }
            "Do" => {
                let painted = operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .is_some_and(|name| resources.image_names.contains(name));
                scan.has_images |= painted;
            }
            "BI" | "ID" | "EI" => scan.has_images = true,
            _ => {}
        }
    }

    scan
}

// -- Line assembly ------------------------------------------------------------

struct Line<'a> {
    baseline: f32,
    tolerance: f32,
    runs: Vec<&'a TextRun>,
}

impl Line<'_> {
    fn render(mut self) -> String {
        self.runs.sort_by(|a, b| a.x.total_cmp(&b.x));
        let mut rendered = String::new();
        let mut previous_end: Option<f32> = None;
        for run in self.runs {
            if let Some(end) = previous_end {
                let gap = run.x - end;
                let spaced = rendered.ends_with(char::is_whitespace)
                    || run.text.starts_with(char::is_whitespace);
                if gap > SPACE_GAP_EM * run.font_size && !spaced {
                    rendered.push(' ');
                }
            }
            rendered.push_str(&run.text);
            previous_end = Some(run.x + run.width);
        }
        rendered.trim_end().to_owned()
    }
}

/// Join runs into lines: runs whose baselines lie within half a font size of
/// each other share a line; lines read top to bottom, runs left to right.
pub fn assemble_lines(runs: &[TextRun]) -> String {
    let mut ordered: Vec<&TextRun> = runs.iter().collect();
    ordered.sort_by(|a, b| b.y.total_cmp(&a.y).then_with(|| a.x.total_cmp(&b.x)));

    let mut lines: Vec<Line<'_>> = Vec::new();
    for run in ordered {
        match lines.last_mut() {
            Some(line) if (line.baseline - run.y).abs() <= line.tolerance => line.runs.push(run),
            _ => lines.push(Line {
                baseline: run.y,
                tolerance: (run.font_size * 0.5).max(1.0),
                runs: vec![run],
            }),
        }
    }

    lines
        .into_iter()
        .map(Line::render)
        .collect::<Vec<_>>()
        .join("\n")
}

// -- Images -------------------------------------------------------------------

fn xobjects<'a>(doc: &'a Document, resources: &'a Dictionary) -> Option<&'a Dictionary> {
    tree::resolve_dict(doc, resources.get(b"XObject").ok()?)
}

/// Whether painting `object` puts an image on the page. Form XObjects are
/// searched `form_depth` levels deep.
fn paints_image(doc: &Document, object: &Object, form_depth: usize) -> bool {
    let Some(Object::Stream(stream)) = tree::resolve(doc, object) else {
        return false;
    };
    match stream.dict.get(b"Subtype").and_then(Object::as_name) {
        Ok(b"Image") => true,
        Ok(b"Form") if form_depth > 0 => stream
            .dict
            .get(b"Resources")
            .ok()
            .and_then(|resources| tree::resolve_dict(doc, resources))
            .and_then(|resources| xobjects(doc, resources))
            .is_some_and(|inner| {
                inner
                    .iter()
                    .any(|(_, object)| paints_image(doc, object, form_depth - 1))
            }),
        _ => false,
    }
}

/// Names in the page's `/XObject` resources that paint an image.
fn image_xobject_names(doc: &Document, page_id: ObjectId) -> HashSet<Vec<u8>> {
    let Some(named) = tree::resources(doc, page_id).and_then(|resources| xobjects(doc, resources))
    else {
        return HashSet::new();
    };
    named
        .iter()
        .filter(|(_, object)| paints_image(doc, object, 1))
        .map(|(name, _)| name.clone())
        .collect()
}

// -- Pages --------------------------------------------------------------------

/// Extract text runs, geometry and image presence for one page.
pub fn extract_page_content(
    doc: &Document,
    page_id: ObjectId,
    page_number: u32,
) -> Result<PageContent> {
    let failure = |reason: String| SeitenwerkError::PageExtraction {
        page: page_number,
        reason,
    };

    let bytes = doc
        .get_page_content(page_id)
        .map_err(|err| failure(format!("unreadable content stream: {err}")))?;
    let operations = if bytes.is_empty() {
        Vec::new()
    } else {
        Content::decode(&bytes)
            .map_err(|err| failure(format!("malformed content stream: {err}")))?
            .operations
    };
    trace!(page = page_number, operations = operations.len(), "Content decoded");

    let scan = scan_operations(&operations, &PageResources::load(doc, page_id));
    let (width, height) = tree::page_size(doc, page_id).unwrap_or_else(|| {
        warn!(page = page_number, "No usable MediaBox, assuming US Letter");
        tree::DEFAULT_PAGE_SIZE
    });
    let text = assemble_lines(&scan.runs);

    debug!(
        page = page_number,
        runs = scan.runs.len(),
        chars = text.chars().count(),
        has_images = scan.has_images,
        width,
        height,
        "Page extracted"
    );

    Ok(PageContent {
        page_number,
        text,
        runs: scan.runs,
        width,
        height,
        has_images: scan.has_images,
    })
}
