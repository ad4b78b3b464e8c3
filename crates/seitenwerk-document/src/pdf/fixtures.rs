// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory PDF builder for unit tests.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

/// Body text size used by the fixture pages.
pub const BODY_SIZE: i32 = 12;

/// One-byte ToUnicode map for font `F2`: six Cyrillic and ASCII codes.
const CYRILLIC_CMAP: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<00> <FF>
endcodespacerange
6 beginbfchar
<01> <0413>
<02> <043B>
<03> <0430>
<04> <0432>
<05> <0020>
<06> <0031>
endbfchar
endcmap
CMapName currentdict /CMap defineresource pop
end
end";

/// "Глава 1" in `F2` glyph codes.
pub const GLAVA_ONE: &[u8] = &[1, 2, 3, 4, 3, 5, 6];

#[derive(Default)]
struct FixturePage {
    operations: Option<Vec<Operation>>,
    media_box: Option<[i32; 4]>,
    rotate: Option<i32>,
    image: bool,
}

/// Builds small PDFs page by page. The root `/Pages` node carries a Letter
/// MediaBox and the font resources (`F1` Helvetica, `F2` with a ToUnicode
/// map), so pages inherit both unless they
/// override them.
#[derive(Default)]
pub struct FixturePdf {
    pages: Vec<FixturePage>,
    nested: bool,
}

/// `BT /F1 12 Tf 14 TL 72 <top> Td (line) Tj T* (line) Tj ... ET`
pub fn body_operations(lines: &[&str], top: i32) -> Vec<Operation> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), BODY_SIZE.into()]),
        Operation::new("TL", vec![14.into()]),
        Operation::new("Td", vec![72.into(), top.into()]),
    ];
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    }
    operations.push(Operation::new("ET", vec![]));
    operations
}

/// A single line at `size` points placed with an explicit text matrix.
pub fn heading_operations(text: &str, size: i32, y: i32) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), size.into()]),
        Operation::new(
            "Tm",
            vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), y.into()],
        ),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

impl FixturePdf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hang every page under an intermediate `/Pages` node.
    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    pub fn page(mut self, operations: Vec<Operation>) -> Self {
        self.pages.push(FixturePage {
            operations: Some(operations),
            ..FixturePage::default()
        });
        self
    }

    pub fn text_page(self, lines: &[&str]) -> Self {
        self.page(body_operations(lines, 720))
    }

    /// Like [`FixturePdf::heading_page`], but the heading is shown as raw
    /// glyph codes in the ToUnicode-mapped font `F2`.
    pub fn mapped_heading_page(self, codes: &[u8], lines: &[&str]) -> Self {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F2".into(), 26.into()]),
            Operation::new(
                "Tm",
                vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), 740.into()],
            ),
            Operation::new(
                "Tj",
                vec![Object::String(codes.to_vec(), StringFormat::Hexadecimal)],
            ),
            Operation::new("ET", vec![]),
        ];
        operations.extend(body_operations(lines, 690));
        self.page(operations)
    }

    pub fn heading_page(self, heading: &str, lines: &[&str]) -> Self {
        let mut operations = heading_operations(heading, 26, 740);
        operations.extend(body_operations(lines, 690));
        self.page(operations)
    }

    pub fn landscape_page(mut self, lines: &[&str]) -> Self {
        self.pages.push(FixturePage {
            operations: Some(body_operations(lines, 540)),
            media_box: Some([0, 0, 792, 612]),
            ..FixturePage::default()
        });
        self
    }

    /// A page with no `/Contents` at all.
    pub fn blank_page(mut self) -> Self {
        self.pages.push(FixturePage::default());
        self
    }

    /// A full-bleed image and nothing else.
    pub fn image_page(mut self) -> Self {
        let operations = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![500.into(), 0.into(), 0.into(), 700.into(), 50.into(), 50.into()],
            ),
            Operation::new("Do", vec!["Im1".into()]),
            Operation::new("Q", vec![]),
        ];
        self.pages.push(FixturePage {
            operations: Some(operations),
            image: true,
            ..FixturePage::default()
        });
        self
    }

    /// Set `/Rotate` on the most recently added page.
    pub fn rotated(mut self, degrees: i32) -> Self {
        if let Some(page) = self.pages.last_mut() {
            page.rotate = Some(degrees);
        }
        self
    }

    pub fn build(self) -> Document {
        let mut doc = Document::with_version("1.5");
        let root_id = doc.new_object_id();
        let parent_id = if self.nested {
            doc.new_object_id()
        } else {
            root_id
        };

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let cmap_id = doc.add_object(Stream::new(
            dictionary! {},
            CYRILLIC_CMAP.as_bytes().to_vec(),
        ));
        let mapped_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "SubsetSerif",
            "ToUnicode" => cmap_id,
        });
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 1,
                "Height" => 1,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            vec![0x80],
        ));

        let mut kids: Vec<Object> = Vec::new();
        for page in self.pages {
            let mut dict = dictionary! {
                "Type" => "Page",
                "Parent" => parent_id,
            };
            if let Some(operations) = page.operations {
                let content = Content { operations }
                    .encode()
                    .expect("fixture content encodes");
                dict.set("Contents", doc.add_object(Stream::new(dictionary! {}, content)));
            }
            if let Some(media_box) = page.media_box {
                let corners: Vec<Object> = media_box.iter().map(|v| (*v).into()).collect();
                dict.set("MediaBox", corners);
            }
            if let Some(rotate) = page.rotate {
                dict.set("Rotate", rotate);
            }
            if page.image {
                dict.set(
                    "Resources",
                    dictionary! {
                        "Font" => dictionary! { "F1" => font_id },
                        "XObject" => dictionary! { "Im1" => image_id },
                    },
                );
            }
            kids.push(doc.add_object(dict).into());
        }

        let count = kids.len() as i64;
        let root_kids = if self.nested {
            doc.objects.insert(
                parent_id,
                Object::Dictionary(dictionary! {
                    "Type" => "Pages",
                    "Parent" => root_id,
                    "Kids" => kids,
                    "Count" => count,
                }),
            );
            vec![parent_id.into()]
        } else {
            kids
        };

        doc.objects.insert(
            root_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => root_kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id, "F2" => mapped_font_id },
                },
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => root_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    pub fn to_bytes(self) -> Vec<u8> {
        let mut doc = self.build();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("fixture saves");
        bytes
    }
}
