// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasterizer — produce a bitmap of a page at a requested DPI.
//
// Scanned documents carry each page as one embedded image XObject. The
// rasterizer picks the largest image on the page, decodes it, scales it to the
// page's MediaBox at the target resolution, and applies the page's /Rotate.
// Pages without raster content (vector-only pages) cannot be rendered and are
// reported as errors so the pipeline can skip them.

use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use speedy_ocr_core::error::{OcrError, Result};
use tracing::debug;

use crate::image::processor::ImageProcessor;

/// PDF user space unit.
const POINTS_PER_INCH: f64 = 72.0;

/// US Letter, used when a page has no usable MediaBox.
const DEFAULT_MEDIA_BOX: (f64, f64) = (612.0, 792.0);

/// Guard against absurd page sizes or resolutions.
const MAX_OUTPUT_PIXELS: u64 = 400_000_000;

/// Bound on /Parent hops when looking up inherited page attributes.
const MAX_INHERITANCE_DEPTH: usize = 64;

/// Filters the decoder cannot handle.
const UNSUPPORTED_FILTERS: [&[u8]; 3] = [b"JPXDecode", b"CCITTFaxDecode", b"JBIG2Decode"];

/// Render page `page_id` of `doc` at `dpi` dots per inch.
pub fn rasterize_page(doc: &Document, page_id: ObjectId, dpi: u32) -> Result<DynamicImage> {
    let (width_pt, height_pt) = page_size(doc, page_id);
    let (width_px, height_px) = output_size(width_pt, height_pt, dpi)?;
    let rotation = page_rotation(doc, page_id);

    let stream = largest_image(doc, page_id)
        .ok_or_else(|| OcrError::Render("page has no embedded raster image".into()))?;
    let decoded = decode_image(doc, stream)?;

    debug!(
        source_w = decoded.width(),
        source_h = decoded.height(),
        width_px,
        height_px,
        rotation,
        "Rasterizing page"
    );

    Ok(ImageProcessor::from_dynamic(decoded)
        .flatten_onto_white()
        .resize_exact(width_px, height_px)
        .rotate(rotation)
        .into_dynamic())
}

/// Pixel dimensions of a `width_pt` x `height_pt` page at `dpi`.
pub fn output_size(width_pt: f64, height_pt: f64, dpi: u32) -> Result<(u32, u32)> {
    let scale = dpi as f64 / POINTS_PER_INCH;
    let width = (width_pt * scale).round().max(1.0);
    let height = (height_pt * scale).round().max(1.0);

    if width * height > MAX_OUTPUT_PIXELS as f64 {
        return Err(OcrError::Render(format!(
            "page would render to {}x{} pixels at {} DPI",
            width, height, dpi
        )));
    }

    Ok((width as u32, height as u32))
}

// -- Page attributes ----------------------------------------------------------

/// Page width and height in points, from the (possibly inherited) MediaBox.
fn page_size(doc: &Document, page_id: ObjectId) -> (f64, f64) {
    let media_box = inherited(doc, page_id, b"MediaBox").and_then(|obj| match resolve(doc, obj) {
        Object::Array(items) if items.len() == 4 => {
            let numbers: Vec<f64> = items
                .iter()
                .filter_map(|item| number(resolve(doc, item)))
                .collect();
            (numbers.len() == 4).then(|| {
                (
                    (numbers[2] - numbers[0]).abs(),
                    (numbers[3] - numbers[1]).abs(),
                )
            })
        }
        _ => None,
    });

    match media_box {
        Some((w, h)) if w > 0.0 && h > 0.0 => (w, h),
        _ => {
            debug!(?page_id, "No usable MediaBox, assuming US Letter");
            DEFAULT_MEDIA_BOX
        }
    }
}

/// Clockwise display rotation in degrees (0 when absent).
fn page_rotation(doc: &Document, page_id: ObjectId) -> i64 {
    inherited(doc, page_id, b"Rotate")
        .and_then(|obj| match resolve(doc, obj) {
            Object::Integer(degrees) => Some(*degrees),
            _ => None,
        })
        .unwrap_or(0)
}

/// Look up `key` on the page dictionary, walking up the /Parent chain.
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
        let parent = match current.get(b"Parent") {
            Ok(Object::Reference(id)) => *id,
            _ => return None,
        };
        current = doc.get_dictionary(parent).ok()?;
    }
    None
}

// -- Image discovery ----------------------------------------------------------

/// The image XObject on the page with the most pixels.
fn largest_image<'a>(doc: &'a Document, page_id: ObjectId) -> Option<&'a Stream> {
    let resources = inherited(doc, page_id, b"Resources").and_then(|obj| as_dict(doc, obj))?;
    let xobjects = resources
        .get(b"XObject")
        .ok()
        .and_then(|obj| as_dict(doc, obj))?;

    xobjects
        .iter()
        .filter_map(|(_, obj)| match resolve(doc, obj) {
            Object::Stream(stream) if is_image(stream) => Some(stream),
            _ => None,
        })
        .max_by_key(|stream| {
            let w = dict_u32(doc, &stream.dict, b"Width").unwrap_or(0) as u64;
            let h = dict_u32(doc, &stream.dict, b"Height").unwrap_or(0) as u64;
            w * h
        })
}

fn is_image(stream: &Stream) -> bool {
    matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(name)) if name.as_slice() == b"Image")
}

// -- Decoding -----------------------------------------------------------------

/// Decode an image XObject into a bitmap at its native size.
fn decode_image(doc: &Document, stream: &Stream) -> Result<DynamicImage> {
    let dict = &stream.dict;
    let width = dict_u32(doc, dict, b"Width")
        .ok_or_else(|| OcrError::Render("image has no valid /Width".into()))?;
    let height = dict_u32(doc, dict, b"Height")
        .ok_or_else(|| OcrError::Render("image has no valid /Height".into()))?;

    let filters = filter_names(doc, dict);

    if let Some(unsupported) = filters
        .iter()
        .find(|name| UNSUPPORTED_FILTERS.iter().any(|f| *f == name.as_slice()))
    {
        return Err(OcrError::Render(format!(
            "unsupported image filter {}",
            String::from_utf8_lossy(unsupported)
        )));
    }

    if filters.iter().any(|name| name.as_slice() == b"DCTDecode") {
        if filters.len() != 1 {
            return Err(OcrError::Render(
                "unsupported filter chain ending in DCTDecode".into(),
            ));
        }
        return Ok(ImageProcessor::from_bytes(&stream.content)?.into_dynamic());
    }

    let data = if filters.is_empty() {
        stream.content.clone()
    } else {
        stream
            .decompressed_content()
            .map_err(|err| OcrError::Render(format!("cannot decompress image data: {}", err)))?
    };

    let image_mask = matches!(dict.get(b"ImageMask"), Ok(Object::Boolean(true)));
    let bits = if image_mask {
        1
    } else {
        dict_u32(doc, dict, b"BitsPerComponent").unwrap_or(8)
    };

    match bits {
        8 => {
            let components = color_components(doc, dict, data.len(), width, height)?;
            decode_8bit(width, height, components, &data)
        }
        1 => decode_1bit(width, height, decode_inverted(doc, dict), &data),
        other => Err(OcrError::Render(format!(
            "unsupported bits per component: {}",
            other
        ))),
    }
}

/// Names listed in /Filter, in application order.
fn filter_names(doc: &Document, dict: &Dictionary) -> Vec<Vec<u8>> {
    match dict.get(b"Filter").map(|obj| resolve(doc, obj)) {
        Ok(Object::Name(name)) => vec![name.clone()],
        Ok(Object::Array(items)) => items
            .iter()
            .filter_map(|item| match resolve(doc, item) {
                Object::Name(name) => Some(name.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Colour components per pixel, from /ColorSpace or inferred from the data size.
fn color_components(
    doc: &Document,
    dict: &Dictionary,
    data_len: usize,
    width: u32,
    height: u32,
) -> Result<usize> {
    let declared = match dict.get(b"ColorSpace").map(|obj| resolve(doc, obj)) {
        Ok(Object::Name(name)) => match name.as_slice() {
            b"DeviceGray" | b"CalGray" | b"G" => Some(1),
            b"DeviceRGB" | b"CalRGB" | b"RGB" => Some(3),
            b"DeviceCMYK" | b"CMYK" => Some(4),
            _ => None,
        },
        Ok(Object::Array(items)) => match items.first() {
            Some(Object::Name(family)) if family.as_slice() == b"Indexed" => {
                return Err(OcrError::Render("indexed colour images are not supported".into()));
            }
            Some(Object::Name(family)) if family.as_slice() == b"ICCBased" => items
                .get(1)
                .and_then(|profile| match resolve(doc, profile) {
                    Object::Stream(stream) => dict_u32(doc, &stream.dict, b"N"),
                    _ => None,
                })
                .map(|n| n as usize),
            Some(Object::Name(family)) if family.as_slice() == b"CalRGB" => Some(3),
            Some(Object::Name(family)) if family.as_slice() == b"CalGray" => Some(1),
            _ => None,
        },
        _ => None,
    };

    let pixels = width as usize * height as usize;
    match declared {
        Some(n @ (1 | 3 | 4)) => Ok(n),
        _ if pixels > 0 && [1, 3, 4].contains(&(data_len / pixels)) => Ok(data_len / pixels),
        _ => Err(OcrError::Render("cannot determine image colour space".into())),
    }
}

fn decode_8bit(width: u32, height: u32, components: usize, data: &[u8]) -> Result<DynamicImage> {
    let expected = width as usize * height as usize * components;
    if data.len() < expected {
        return Err(OcrError::Render(format!(
            "image data truncated: expected {} bytes, found {}",
            expected,
            data.len()
        )));
    }
    let data = &data[..expected];

    let image = match components {
        1 => GrayImage::from_raw(width, height, data.to_vec()).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width, height, data.to_vec()).map(DynamicImage::ImageRgb8),
        _ => {
            let rgb: Vec<u8> = data.chunks_exact(4).flat_map(cmyk_to_rgb).collect();
            RgbImage::from_raw(width, height, rgb).map(DynamicImage::ImageRgb8)
        }
    };

    image.ok_or_else(|| OcrError::Render("image buffer size mismatch".into()))
}

fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let k = 255 - cmyk[3] as u32;
    let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
    [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])]
}

/// Unpack a 1-bit image (rows padded to whole bytes). A set bit is white
/// unless `inverted`.
fn decode_1bit(width: u32, height: u32, inverted: bool, data: &[u8]) -> Result<DynamicImage> {
    let row_bytes = (width as usize).div_ceil(8);
    if data.len() < row_bytes * height as usize {
        return Err(OcrError::Render("bilevel image data truncated".into()));
    }

    let image = GrayImage::from_fn(width, height, |x, y| {
        let byte = data[y as usize * row_bytes + x as usize / 8];
        let bit = (byte >> (7 - (x % 8))) & 1 == 1;
        let white = bit != inverted;
        image::Luma([if white { 255 } else { 0 }])
    });

    Ok(DynamicImage::ImageLuma8(image))
}

/// `/Decode [1 0]` flips the meaning of bilevel samples.
fn decode_inverted(doc: &Document, dict: &Dictionary) -> bool {
    match dict.get(b"Decode").map(|obj| resolve(doc, obj)) {
        Ok(Object::Array(items)) => items.first().and_then(number) == Some(1.0),
        _ => false,
    }
}

// -- Object helpers -----------------------------------------------------------

/// Follow an indirect reference; other objects are returned as-is.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        other => other,
    }
}

fn as_dict<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    match resolve(doc, object) {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(*value as f64),
        _ => None,
    }
}

fn dict_u32(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<u32> {
    match dict.get(key).map(|obj| resolve(doc, obj)) {
        Ok(Object::Integer(value)) => u32::try_from(*value).ok().filter(|v| *v > 0),
        _ => None,
    }
}
