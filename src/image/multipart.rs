//! multipart/form-data form for the image edits endpoint.

use crate::error::{AzEditError, Result};
use crate::image::types::{mime_type_for_path, ImageEditRequest};
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// A form ready to send, with the `Content-Type` it will go out with.
#[derive(Debug)]
pub struct MultipartForm {
    /// The form; pass to `RequestBuilder::multipart`.
    pub form: Form,
    /// `multipart/form-data; boundary=...` matching the form's boundary.
    pub content_type: String,
}

/// Field name for image parts: `image` for a single file, `image[]` when the
/// API should receive an array.
pub fn image_field_name(count: usize) -> &'static str {
    if count > 1 {
        "image[]"
    } else {
        "image"
    }
}

/// Builds the form for an edit request: one part per image (background
/// first), then `prompt`, `n` and `size`.
pub fn build_multipart_form(request: &ImageEditRequest) -> Result<MultipartForm> {
    let images = request.images();
    let field = image_field_name(images.len());

    // Names and filenames go out as-is, like a browser would send them.
    let mut form = Form::new().percent_encode_noop();
    for path in &images {
        form = form.part(field, image_part(field, path)?);
    }

    let form = form
        .text("prompt", request.prompt.clone())
        .text("n", ImageEditRequest::COUNT.to_string())
        .text("size", request.size.clone());

    let content_type = format!("multipart/form-data; boundary={}", form.boundary());
    tracing::debug!(images = images.len(), field, "built multipart form");

    Ok(MultipartForm { form, content_type })
}

/// Reads one image into a part; the file is closed before returning.
fn image_part(field: &str, path: &Path) -> Result<Part> {
    let data = std::fs::read(path).map_err(|source| AzEditError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime_type = mime_type_for_path(path);
    tracing::debug!(path = %path.display(), mime_type, bytes = data.len(), "adding image part");
    file_part(field, &filename, mime_type, data)
}

/// Wraps raw bytes as a file part. reqwest escapes `\` and `"` in the filename.
pub(crate) fn file_part(field: &str, filename: &str, mime_type: &str, data: Vec<u8>) -> Result<Part> {
    Part::bytes(data)
        .file_name(filename.to_string())
        .mime_str(mime_type)
        .map_err(|source| AzEditError::FormField {
            field: field.to_string(),
            source,
        })
}
