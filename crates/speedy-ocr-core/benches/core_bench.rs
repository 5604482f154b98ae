// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the speedy-ocr-core crate: page selection and the
// three output formatters on a synthetic 500-page result.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use speedy_ocr_core::format::OutputFormat;
use speedy_ocr_core::{OcrResult, PageResult, PageSelection};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Parse and resolve a fragmented selection against a long document.
fn bench_page_selection(c: &mut Criterion) {
    let spec = "1-100, 150, 200-260, 90-120, 400-2000, 7, 7, 7";

    c.bench_function("page_selection parse+resolve (1000 pages)", |b| {
        b.iter(|| {
            let selection = PageSelection::parse(black_box(spec)).unwrap();
            black_box(selection.resolve(1000));
        });
    });
}

fn bench_formatters(c: &mut Criterion) {
    let result = OcrResult {
        source_file_name: "bench.pdf".into(),
        total_pages: 500,
        processed_pages: (1..=500)
            .map(|n| PageResult::new(n, format!("Line one of page {n}\nLine two\nLine three")))
            .collect(),
        dpi: 150,
        languages: vec!["ja".into(), "en".into()],
        elapsed_seconds: 42.0,
        warnings: Vec::new(),
    };

    for format in OutputFormat::ALL {
        c.bench_function(&format!("format {format} (500 pages)"), |b| {
            b.iter(|| black_box(format.format(black_box(&result))));
        });
    }
}

criterion_group!(benches, bench_page_selection, bench_formatters);
criterion_main!(benches);
