// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the seitenwerk-document crate. Measures content
// stream walking on a synthetic text-heavy page, served through the
// `PageSource` port exactly as the analysis engine sees it.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use seitenwerk_core::PageSource;
use seitenwerk_document::PdfPageSource;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A single Letter page with 50 lines of 12pt text in one text object.
fn dense_page_pdf() -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("TL", vec![14.into()]),
        Operation::new("Td", vec![72.into(), 740.into()]),
    ];
    for line in 0..50 {
        operations.push(Operation::new("T*", vec![]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(format!(
                "Line {line}: the quick brown fox jumps over the lazy dog"
            ))],
        ));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations }
        .encode()
        .expect("benchmark content encodes");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_page_extraction(c: &mut Criterion) {
    let source = PdfPageSource::from_document(dense_page_pdf());
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .expect("tokio runtime");

    c.bench_function("extract_page (50 lines)", |b| {
        b.iter(|| {
            let page = runtime
                .block_on(source.extract_page(black_box(1)))
                .expect("page extracts");
            black_box(page.runs.len());
        });
    });
}

criterion_group!(benches, bench_page_extraction);
criterion_main!(benches);
