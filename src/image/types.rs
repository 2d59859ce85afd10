//! Core types for image editing.

use crate::error::{AzEditError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default output size.
pub const DEFAULT_SIZE: &str = "1024x1024";

/// Suffix inserted before the extension of the derived output path.
pub const OUTPUT_SUFFIX: &str = "_generated";

/// MIME type used when the extension is not a known image type.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Image formats recognised by extension or magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
    /// GIF format.
    Gif,
    /// Windows bitmap.
    Bmp,
    /// TIFF format.
    Tiff,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Returns the registered MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// Attempts to detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" | "jpe" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }
        if data.starts_with(b"BM") {
            return Some(Self::Bmp);
        }
        if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
            return Some(Self::Tiff);
        }
        None
    }
}

/// Returns the MIME type for a file based on its extension, falling back to
/// `application/octet-stream`.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(ImageFormat::from_extension)
        .map(|f| f.mime_type())
        .unwrap_or(OCTET_STREAM)
}

/// Derives the output path by inserting `_generated` before the extension.
///
/// `assets/cat.png` becomes `assets/cat_generated.png`; `assets/cat`
/// becomes `assets/cat_generated`.
pub fn derive_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, OUTPUT_SUFFIX),
    };
    input.with_file_name(name)
}

/// Size value that lets the service pick the output dimensions.
pub const AUTO_SIZE: &str = "auto";

/// Checks that `size` is `auto` or `<width>x<height>` with positive integers.
pub fn validate_size(size: &str) -> Result<()> {
    if size == AUTO_SIZE {
        return Ok(());
    }
    let invalid = || {
        AzEditError::InvalidRequest(format!(
            "size must be {AUTO_SIZE} or <width>x<height> (e.g. {DEFAULT_SIZE}), got {size:?}"
        ))
    };
    let (w, h) = size.split_once('x').ok_or_else(invalid)?;
    let w: u32 = w.parse().map_err(|_| invalid())?;
    let h: u32 = h.parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok(())
}

/// A request to edit or composite images.
#[derive(Debug, Clone)]
pub struct ImageEditRequest {
    /// The text prompt describing the edit.
    pub prompt: String,
    /// Subject image.
    pub foreground: PathBuf,
    /// Optional background/context image, sent before the foreground.
    pub background: Option<PathBuf>,
    /// Output size as `<width>x<height>` or `auto`.
    pub size: String,
}

impl ImageEditRequest {
    /// Number of images requested from the API.
    pub const COUNT: u32 = 1;

    /// Creates a request editing a single image.
    pub fn new(prompt: impl Into<String>, foreground: impl Into<PathBuf>) -> Self {
        Self {
            prompt: prompt.into(),
            foreground: foreground.into(),
            background: None,
            size: DEFAULT_SIZE.to_string(),
        }
    }

    /// Adds a background image to composite the foreground onto.
    pub fn with_background(mut self, background: impl Into<PathBuf>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Sets the output size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Returns the images in upload order: background first, then foreground.
    pub fn images(&self) -> Vec<&Path> {
        self.background
            .iter()
            .map(PathBuf::as_path)
            .chain(std::iter::once(self.foreground.as_path()))
            .collect()
    }

    /// Returns the default output path for this request.
    pub fn output_path(&self) -> PathBuf {
        derive_output_path(&self.foreground)
    }
}

/// Metadata about the edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Deployment that served the request.
    pub deployment: Option<String>,
    /// Round-trip duration in milliseconds.
    pub duration_ms: Option<u64>,
}

/// A decoded image returned by the API.
#[derive(Debug, Clone)]
#[must_use = "generated image should be saved or processed"]
pub struct GeneratedImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Format detected from magic bytes, if recognised.
    pub format: Option<ImageFormat>,
    /// Generation metadata.
    pub metadata: GenerationMetadata,
}

impl GeneratedImage {
    /// Wraps decoded bytes, detecting the format.
    pub fn new(data: Vec<u8>, metadata: GenerationMetadata) -> Self {
        let format = ImageFormat::from_magic_bytes(&data);
        Self {
            data,
            format,
            metadata,
        }
    }

    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the size of the image data in mebibytes.
    pub fn size_mb(&self) -> f64 {
        self.data.len() as f64 / (1024.0 * 1024.0)
    }

    /// Saves the image to `path`, creating the parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path("assets/cat.png"),
            PathBuf::from("assets/cat_generated.png")
        );
        assert_eq!(
            derive_output_path("assets/cat"),
            PathBuf::from("assets/cat_generated")
        );
        assert_eq!(
            derive_output_path("photo.final.jpg"),
            PathBuf::from("photo.final_generated.jpg")
        );
    }

    #[test]
    fn test_mime_type_for_path() {
        assert_eq!(mime_type_for_path(Path::new("a/cat.png")), "image/png");
        assert_eq!(mime_type_for_path(Path::new("cat.JPG")), "image/jpeg");
        assert_eq!(mime_type_for_path(Path::new("cat.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for_path(Path::new("cat.webp")), "image/webp");
        assert_eq!(mime_type_for_path(Path::new("cat.xyz")), OCTET_STREAM);
        assert_eq!(mime_type_for_path(Path::new("cat")), OCTET_STREAM);
    }

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(ImageFormat::from_magic_bytes(&PNG_MAGIC), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_magic_bytes(&WEBP_MAGIC), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a.."), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::from_magic_bytes(b"hello"), None);
    }

    #[test]
    fn test_validate_size() {
        assert!(validate_size("1024x1024").is_ok());
        assert!(validate_size("1536x1024").is_ok());
        assert!(validate_size("auto").is_ok());
        assert!(validate_size("").is_err());
        assert!(validate_size("1024").is_err());
        assert!(validate_size("0x1024").is_err());
        assert!(validate_size("axb").is_err());
        assert!(validate_size("1024X1024").is_err());
    }

    #[test]
    fn test_request_image_order() {
        let req = ImageEditRequest::new("put the cat on the beach", "fg.png");
        assert_eq!(req.images(), vec![Path::new("fg.png")]);
        assert_eq!(req.size, DEFAULT_SIZE);

        let req = req.with_background("bg.jpg").with_size("1536x1024");
        assert_eq!(req.images(), vec![Path::new("bg.jpg"), Path::new("fg.png")]);
        assert_eq!(req.size, "1536x1024");
        assert_eq!(req.output_path(), PathBuf::from("fg_generated.png"));
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/cat_generated.png");
        let image = GeneratedImage::new(PNG_MAGIC.to_vec(), GenerationMetadata::default());
        assert_eq!(image.format, Some(ImageFormat::Png));

        image.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), PNG_MAGIC.to_vec());
    }

    #[test]
    fn test_size_mb() {
        let image = GeneratedImage::new(vec![0; 1024 * 1024], GenerationMetadata::default());
        assert!((image.size_mb() - 1.0).abs() < f64::EPSILON);
        assert_eq!(image.format, None);
    }
}
