// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use serde::Serialize;

use crate::types::OcrResult;

// Field order is the serialized key order; keep both structs alphabetical.

#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    metadata: JsonMetadata<'a>,
    pages: Vec<JsonPage<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonMetadata<'a> {
    dpi: u32,
    elapsed_seconds: f64,
    languages: &'a [String],
    processed_pages: usize,
    source: &'a str,
    total_pages: usize,
}

#[derive(Debug, Serialize)]
struct JsonPage<'a> {
    page: usize,
    text: &'a str,
}

/// JSON: `{ "metadata": {...}, "pages": [{ "page", "text" }] }`, pretty-printed
/// with sorted keys and elapsed seconds rounded to one decimal place.
pub fn format_json(result: &OcrResult) -> String {
    let document = JsonDocument {
        metadata: JsonMetadata {
            dpi: result.dpi,
            elapsed_seconds: round_to_tenth(result.elapsed_seconds),
            languages: &result.languages,
            processed_pages: result.processed_count(),
            source: &result.source_file_name,
            total_pages: result.total_pages,
        },
        pages: result
            .processed_pages
            .iter()
            .map(|page| JsonPage {
                page: page.page_number,
                text: &page.text,
            })
            .collect(),
    };

    serde_json::to_string_pretty(&document).unwrap_or_else(|_| "{}".to_string())
}

fn round_to_tenth(seconds: f64) -> f64 {
    (seconds * 10.0).round() / 10.0
}
