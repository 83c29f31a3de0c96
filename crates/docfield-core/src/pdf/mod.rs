//! Input documents and page rasterization.

pub(crate) mod rasterizer;

pub use rasterizer::PdfRasterizer;

use std::path::Path;

use image::{DynamicImage, ImageFormat};

use crate::error::ConversionError;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Turns a paginated document into page images.
pub trait Rasterizer: Send + Sync {
    /// Rasterize at most `max_pages` pages, in page order.
    fn rasterize(&self, data: &[u8], max_pages: usize) -> Result<Vec<DynamicImage>>;
}

/// Kind of input file, decided from content first and extension second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Single-page raster image.
    Image(ImageFormat),
    /// PDF document.
    Pdf,
}

impl FileKind {
    pub fn detect(data: &[u8], file_name: &str) -> Option<Self> {
        if data.starts_with(b"%PDF") {
            return Some(FileKind::Pdf);
        }
        if let Ok(format) = image::guess_format(data) {
            return Some(FileKind::Image(format));
        }

        let extension = Path::new(file_name).extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("pdf") {
            Some(FileKind::Pdf)
        } else {
            ImageFormat::from_extension(extension).map(FileKind::Image)
        }
    }
}

/// A file submitted for extraction.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    /// Original file name, used for the extension fallback and in logs.
    pub file_name: String,
    pub data: Vec<u8>,
}

impl DocumentFile {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    /// Read a file from disk.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, data })
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::detect(&self.data, &self.file_name)
    }
}

/// Decode a single raster image.
pub fn decode_image(data: &[u8], format: ImageFormat) -> Result<DynamicImage> {
    image::load_from_memory_with_format(data, format)
        .map_err(|e| ConversionError::Decode(e.to_string()))
}
