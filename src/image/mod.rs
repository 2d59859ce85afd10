//! Image editing module.

mod client;
pub mod multipart;
mod provider;
pub mod response;
mod types;

pub use client::{AzureImageEditClient, AzureImageEditClientBuilder, DEFAULT_TIMEOUT};
pub use multipart::{build_multipart_form, MultipartForm};
pub use provider::{ImageEditor, ImageEditorExt};
pub use response::{decode_response, ApiErrorBody, ImageEditResponse};
pub use types::{
    derive_output_path, mime_type_for_path, validate_size, GeneratedImage, GenerationMetadata,
    ImageEditRequest, ImageFormat, AUTO_SIZE, DEFAULT_SIZE, OUTPUT_SUFFIX,
};
