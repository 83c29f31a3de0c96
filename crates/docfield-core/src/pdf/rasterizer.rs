//! Page images of scanned PDFs, read with lopdf.
//!
//! Scanned documents carry one raster image per page. The largest image
//! XObject of each page is taken as the page itself; vector content is not
//! rendered.

use std::collections::HashSet;

use image::{DynamicImage, ImageBuffer, Rgba};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{Rasterizer, Result};
use crate::error::ConversionError;

/// [`Rasterizer`] over scanned PDFs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRasterizer;

impl PdfRasterizer {
    pub fn new() -> Self {
        Self
    }

    fn load(data: &[u8]) -> Result<Document> {
        let mut doc = Document::load_mem(data).map_err(|e| ConversionError::Parse(e.to_string()))?;

        // Many scanners emit PDFs encrypted with an empty user password.
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(ConversionError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        Ok(doc)
    }

    /// Largest decodable image of a page.
    fn page_image(doc: &Document, page_id: ObjectId) -> Option<DynamicImage> {
        let resources = page_resources(doc, page_id)?;
        let xobjects = resources.get(b"XObject").ok()?;
        let Ok((_, Object::Dictionary(xobjects))) = doc.dereference(xobjects) else {
            return None;
        };

        xobjects
            .iter()
            .filter_map(|(_, obj_ref)| doc.dereference(obj_ref).ok())
            .filter_map(|(_, obj)| decode_xobject(doc, obj))
            .max_by_key(|img| u64::from(img.width()) * u64::from(img.height()))
    }
}

impl Rasterizer for PdfRasterizer {
    fn rasterize(&self, data: &[u8], max_pages: usize) -> Result<Vec<DynamicImage>> {
        let doc = Self::load(data)?;

        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(ConversionError::NoPages);
        }
        debug!("Loaded PDF with {} pages, rasterizing up to {}", pages.len(), max_pages);

        pages
            .iter()
            .take(max_pages)
            .map(|(&number, &page_id)| {
                let image = Self::page_image(&doc, page_id)
                    .ok_or(ConversionError::NoRaster(number))?;
                trace!("Page {}: {}x{}", number, image.width(), image.height());
                Ok(image)
            })
            .collect()
    }
}

/// Resources of a page, inherited from the page tree when absent on the page.
/// A `/Parent` chain that loops back on itself yields no resources.
fn page_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut visited = HashSet::new();
    let mut node_id = page_id;

    loop {
        if !visited.insert(node_id) {
            trace!("Cycle in page tree at object {:?}", node_id);
            return None;
        }
        let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
            return None;
        };

        if let Ok(resources) = dict.get(b"Resources") {
            if let Ok((_, Object::Dictionary(resources))) = doc.dereference(resources) {
                return Some(resources.clone());
            }
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => node_id = *parent_id,
            _ => return None,
        }
    }
}

fn decode_xobject(doc: &Document, obj: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = obj else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;
    trace!("Found image XObject: {}x{}", width, height);

    let filter = dict.get(b"Filter").ok().and_then(|filter| match filter {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
        _ => None,
    });

    match filter {
        Some(b"DCTDecode") => {
            return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                .ok();
        }
        Some(b"JPXDecode" | b"CCITTFaxDecode" | b"JBIG2Decode") => {
            trace!("Unsupported image filter");
            return None;
        }
        _ => {}
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);

    raw_to_image(&data, width, height, color_space, bits)
}

/// Build an image from uncompressed 8-bit gray, RGB or CMYK samples.
fn raw_to_image(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: &[u8],
    bits: i64,
) -> Option<DynamicImage> {
    if bits != 8 {
        trace!("Unsupported bits per component: {}", bits);
        return None;
    }

    let components = match color_space {
        b"DeviceGray" | b"G" => 1,
        b"DeviceRGB" | b"RGB" => 3,
        b"DeviceCMYK" | b"CMYK" => 4,
        _ => {
            trace!("Unsupported color space {:?}", String::from_utf8_lossy(color_space));
            return None;
        }
    };

    // Dimensions come from the file and may be absurd.
    let Some(len) = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(components))
    else {
        trace!("Image dimensions {}x{} overflow", width, height);
        return None;
    };
    if data.len() < len {
        trace!("Image needs {} bytes, stream has {}", len, data.len());
        return None;
    }

    let rgba: Vec<u8> = data[..len]
        .chunks_exact(components)
        .flat_map(sample_to_rgba)
        .collect();

    ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba).map(DynamicImage::ImageRgba8)
}

fn sample_to_rgba(sample: &[u8]) -> [u8; 4] {
    match *sample {
        [g] => [g, g, g, 255],
        [r, g, b] => [r, g, b, 255],
        [c, m, y, k] => {
            let white = 255 - u16::from(k);
            let channel = |v: u8| (white * (255 - u16::from(v)) / 255) as u8;
            [channel(c), channel(m), channel(y), 255]
        }
        _ => [0, 0, 0, 255],
    }
}
