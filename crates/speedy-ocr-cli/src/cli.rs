// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use speedy_ocr_core::config::{DEFAULT_DPI, OcrConfig};
use speedy_ocr_core::format::OutputFormat;
use speedy_ocr_core::{PageSelection, Result};

/// Fast parallel OCR for scanned PDF documents.
#[derive(Debug, Parser)]
#[command(name = "speedy-ocr", about, version)]
pub struct Cli {
    /// Path to the PDF file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Txt)]
    pub format: FormatArg,

    /// Pages to process (e.g. '1-5,8,10-12'). Default: all pages
    #[arg(long)]
    pub pages: Option<String>,

    /// Rendering resolution in dots per inch
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: u32,

    /// Recognition languages, highest priority first
    #[arg(long, value_delimiter = ',', default_value = "ja,en")]
    pub language: Vec<String>,

    /// Disable language correction
    #[arg(long)]
    pub no_language_correction: bool,

    /// Suppress progress and diagnostic output
    #[arg(short, long)]
    pub quiet: bool,

    /// Number of worker threads. Default: available parallelism
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Directory containing text-detection.rten and text-recognition.rten
    #[arg(long, value_name = "DIR", env = "SPEEDY_OCR_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,
}

/// Output format choices (mirrors `OutputFormat` for clap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Plain text, pages separated by a blank line
    Txt,
    /// Markdown with one heading per page
    Md,
    /// JSON with run metadata
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => OutputFormat::Txt,
            FormatArg::Md => OutputFormat::Md,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Build the run configuration. Fails on a malformed `--pages`.
    pub fn to_config(&self) -> Result<OcrConfig> {
        let pages = match &self.pages {
            Some(spec) => PageSelection::parse(spec)?,
            None => PageSelection::All,
        };

        let mut config = OcrConfig::new(&self.input)
            .with_format(self.format.into())
            .with_pages(pages)
            .with_dpi(self.dpi)
            .with_languages(
                self.language
                    .iter()
                    .map(|language| language.trim())
                    .filter(|language| !language.is_empty()),
            )
            .with_language_correction(!self.no_language_correction)
            .with_quiet(self.quiet);

        if let Some(path) = &self.output {
            config = config.with_output_path(path);
        }
        if let Some(jobs) = self.jobs {
            config = config.with_workers(jobs);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speedy_ocr_core::{OcrError, PageRange};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("speedy-ocr").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&["scan.pdf"]).to_config().unwrap();
        assert_eq!(config.format, OutputFormat::Txt);
        assert_eq!(config.pages, PageSelection::All);
        assert_eq!(config.dpi, 150);
        assert_eq!(config.languages, ["ja", "en"]);
        assert!(config.uses_language_correction);
        assert!(!config.quiet);
        assert_eq!(config.workers, None);
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn all_flags() {
        let cli = parse(&[
            "scan.pdf",
            "-o",
            "out.json",
            "-f",
            "json",
            "--pages",
            "1-3, 7",
            "--dpi",
            "300",
            "--language",
            "en-US, fr",
            "--no-language-correction",
            "-q",
            "-j",
            "2",
        ]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(
            config.pages,
            PageSelection::Ranges(vec![
                PageRange::Range { start: 1, end: 3 },
                PageRange::Single(7)
            ])
        );
        assert_eq!(config.dpi, 300);
        assert_eq!(config.languages, ["en-US", "fr"]);
        assert!(!config.uses_language_correction);
        assert!(config.quiet);
        assert_eq!(config.workers, Some(2));
        assert_eq!(config.output_path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn empty_language_segments_are_skipped() {
        let config = parse(&["scan.pdf", "--language", "ja,,en, "])
            .to_config()
            .unwrap();
        assert_eq!(config.languages, ["ja", "en"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_pages_is_a_selection_error() {
        let err = parse(&["scan.pdf", "--pages", "10-5"]).to_config().unwrap_err();
        assert!(matches!(err, OcrError::PageSelection(_)));
        assert_eq!(err.to_string(), "Invalid page range: '10-5'");
    }

    #[test]
    fn zero_dpi_is_rejected_by_clap() {
        let result = Cli::try_parse_from(["speedy-ocr", "scan.pdf", "--dpi", "0"]);
        assert!(result.is_err());
    }
}
