// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output formatters — pure transforms from an `OcrResult` to plain text,
// Markdown, or JSON.

mod json;
mod markdown;
mod plain;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::OcrResult;

pub use json::format_json;
pub use markdown::format_markdown;
pub use plain::format_plain_text;

/// Output format for OCR results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, pages separated by a blank line.
    #[default]
    Txt,
    /// Markdown with a title and one heading per page.
    Md,
    /// JSON with run metadata and a pages array.
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [Self::Txt, Self::Md, Self::Json];

    /// Render `result` in this format. Deterministic and infallible.
    pub fn format(self, result: &OcrResult) -> String {
        match self {
            Self::Txt => format_plain_text(result),
            Self::Md => format_markdown(result),
            Self::Json => format_json(result),
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Md => "md",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == s)
            .ok_or_else(|| format!("Invalid format '{s}'. Use: txt, md, json"))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::PageResult;

    /// Three pages, the last one empty.
    pub(crate) fn sample_result() -> OcrResult {
        OcrResult {
            source_file_name: "test.pdf".into(),
            total_pages: 3,
            processed_pages: vec![
                PageResult::new(1, "Hello World"),
                PageResult::new(2, "Page two content"),
                PageResult::new(3, ""),
            ],
            dpi: 150,
            languages: vec!["en".into()],
            elapsed_seconds: 1.54,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn parses_known_formats() {
        assert_eq!("txt".parse::<OutputFormat>(), Ok(OutputFormat::Txt));
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Md));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "pdf".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err, "Invalid format 'pdf'. Use: txt, md, json");
    }

    #[test]
    fn dispatch_matches_direct_calls() {
        let result = sample_result();
        assert_eq!(OutputFormat::Txt.format(&result), format_plain_text(&result));
        assert_eq!(OutputFormat::Md.format(&result), format_markdown(&result));
        assert_eq!(OutputFormat::Json.format(&result), format_json(&result));
    }

    #[test]
    fn formatting_is_idempotent() {
        let result = sample_result();
        for format in OutputFormat::ALL {
            assert_eq!(format.format(&result), format.format(&result));
        }
    }

    #[test]
    fn every_format_handles_an_empty_result() {
        let result = OcrResult {
            processed_pages: Vec::new(),
            ..sample_result()
        };
        assert_eq!(OutputFormat::Txt.format(&result), "");
        assert_eq!(OutputFormat::Md.format(&result), "# test\n");
        assert!(OutputFormat::Json.format(&result).contains("\"processedPages\": 0"));
    }

    #[test]
    fn end_to_end_three_pages_with_empty_last() {
        let result = sample_result();

        let text = OutputFormat::Txt.format(&result);
        assert_eq!(text.matches("\n\n").count(), 1);

        let md = OutputFormat::Md.format(&result);
        assert_eq!(md.matches("## Page ").count(), 3);

        let json = OutputFormat::Json.format(&result);
        assert!(json.contains("\"processedPages\": 3"));
    }
}
