// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test fixtures — build small scanned-style PDFs in memory with lopdf.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

/// One page of a fixture document.
#[derive(Debug, Clone)]
pub struct FixturePage {
    /// Page size in points; `None` inherits the page tree's Letter box.
    media_box: Option<(u32, u32)>,
    rotate: Option<i64>,
    image: Option<FixtureImage>,
}

#[derive(Debug, Clone)]
struct FixtureImage {
    width: u32,
    height: u32,
    color_space: &'static str,
    bits: u32,
    data: Vec<u8>,
    filter: Option<&'static str>,
    compress: bool,
}

impl FixturePage {
    /// A Letter-sized page with no images.
    pub fn blank() -> Self {
        Self {
            media_box: Some((612, 792)),
            rotate: None,
            image: None,
        }
    }

    /// A page showing a uniform 8-bit grayscale image.
    pub fn gray(width: u32, height: u32, value: u8) -> Self {
        let data = vec![value; (width * height) as usize];
        Self::raw(width, height, "DeviceGray", data)
    }

    /// A page showing a uniform 8-bit RGB image.
    pub fn rgb(width: u32, height: u32, color: [u8; 3]) -> Self {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        Self::raw(width, height, "DeviceRGB", data)
    }

    /// A page with an unfiltered 8-bit image and arbitrary sample data.
    pub fn raw(width: u32, height: u32, color_space: &'static str, data: Vec<u8>) -> Self {
        Self::blank().with_image(FixtureImage {
            width,
            height,
            color_space,
            bits: 8,
            data,
            filter: None,
            compress: false,
        })
    }

    /// A page with a 1-bit image; `rows` is packed MSB-first.
    pub fn bilevel(width: u32, height: u32, rows: Vec<u8>) -> Self {
        Self::blank().with_image(FixtureImage {
            width,
            height,
            color_space: "DeviceGray",
            bits: 1,
            data: rows,
            filter: None,
            compress: false,
        })
    }

    /// A page with a mid-gray JPEG (DCTDecode) image.
    pub fn jpeg(width: u32, height: u32) -> Self {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, image::Luma([128])));
        let mut encoded = Vec::new();
        img.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)
            .unwrap();

        Self::blank().with_image(FixtureImage {
            width,
            height,
            color_space: "DeviceGray",
            bits: 8,
            data: encoded,
            filter: Some("DCTDecode"),
            compress: false,
        })
    }

    pub fn with_media_box(mut self, width: u32, height: u32) -> Self {
        self.media_box = Some((width, height));
        self
    }

    pub fn without_media_box(mut self) -> Self {
        self.media_box = None;
        self
    }

    pub fn with_rotate(mut self, degrees: i64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Declare `/Filter` on the image without touching its data.
    pub fn with_filter(mut self, filter: &'static str) -> Self {
        if let Some(image) = self.image.as_mut() {
            image.filter = Some(filter);
        }
        self
    }

    /// Flate-compress the image stream.
    pub fn compressed(mut self) -> Self {
        if let Some(image) = self.image.as_mut() {
            image.compress = true;
        }
        self
    }

    fn with_image(mut self, image: FixtureImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Serialize `pages` into a complete PDF file.
pub fn build_pdf(pages: &[FixturePage]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut resources = Dictionary::new();
        let mut content = Vec::new();

        if let Some(image) = &page.image {
            let mut image_dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => image.color_space,
                "BitsPerComponent" => image.bits as i64,
            };
            if let Some(filter) = image.filter {
                image_dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
            }
            let mut stream = Stream::new(image_dict, image.data.clone());
            if image.compress {
                stream.compress().unwrap();
            }
            let image_id = doc.add_object(stream);
            resources.set("XObject", dictionary! { "Im0" => image_id });

            let (w, h) = page.media_box.unwrap_or((612, 792));
            content = format!("q {} 0 0 {} 0 0 cm /Im0 Do Q", w, h).into_bytes();
        }

        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources,
        };
        if let Some((w, h)) = page.media_box {
            page_dict.set(
                "MediaBox",
                vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(w as i64),
                    Object::Integer(h as i64),
                ],
            );
        }
        if let Some(degrees) = page.rotate {
            page_dict.set("Rotate", degrees);
        }
        kids.push(doc.add_object(page_dict).into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages.len() as i64,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
