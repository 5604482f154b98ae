// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use crate::types::OcrResult;

/// Plain text: non-empty pages joined by one blank line. Empty pages are
/// dropped entirely.
pub fn format_plain_text(result: &OcrResult) -> String {
    result
        .processed_pages
        .iter()
        .filter(|page| !page.text.is_empty())
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
