// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::path::Path;

use crate::types::OcrResult;

/// Markdown: `# <file stem>` title, then `## Page N` for every processed page.
/// Empty pages keep their heading but get no body.
pub fn format_markdown(result: &OcrResult) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(2 + result.processed_pages.len() * 4);

    lines.push(format!("# {}", title_of(&result.source_file_name)));
    lines.push(String::new());

    for page in &result.processed_pages {
        lines.push(format!("## Page {}", page.page_number));
        lines.push(String::new());
        if !page.text.is_empty() {
            lines.push(page.text.clone());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// File name without its final extension.
fn title_of(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}
