// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared helpers for pipeline integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::DynamicImage;
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use speedy_ocr_core::Result;
use speedy_ocr_core::ports::{RecognitionOptions, TextRecognizer};

/// One 72x72 pt page per entry: `true` carries an 8x8 grayscale scan, `false`
/// only vector text.
pub fn scanned_pdf(pages: &[bool]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for &scanned in pages {
        let mut resources = Dictionary::new();
        let content = if scanned {
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 8i64,
                    "Height" => 8i64,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8i64,
                },
                vec![90; 64],
            ));
            resources.set("XObject", dictionary! { "Im0" => image_id });
            b"q 72 0 0 72 0 0 cm /Im0 Do Q".to_vec()
        } else {
            b"BT /F1 12 Tf 10 40 Td (vector) Tj ET".to_vec()
        };

        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        kids.push(Object::Reference(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources,
        })));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(72),
                Object::Integer(72),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

pub fn write_pdf(dir: &Path, name: &str, pages: &[bool]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, scanned_pdf(pages)).unwrap();
    path
}

/// "Recognizes" a page as its pixel dimensions, e.g. `72x72`.
pub struct DimensionsRecognizer;

impl TextRecognizer for DimensionsRecognizer {
    fn recognize(&self, image: &DynamicImage, _options: &RecognitionOptions) -> Result<String> {
        Ok(format!("{}x{}", image.width(), image.height()))
    }
}
