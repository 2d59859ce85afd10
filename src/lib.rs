#![warn(missing_docs)]
//! azedit - image editing and compositing through Azure OpenAI.
//!
//! Sends one or two local images plus a prompt to the `images/edits`
//! endpoint of an Azure OpenAI deployment and decodes the returned image.
//! Authentication uses Azure's default credential chain.
//!
//! # Quick Start
//!
//! ```no_run
//! use azedit::{AzureImageEditClient, ImageEditRequest, ImageEditorExt};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> azedit::Result<()> {
//!     // Reads AZURE_OPENAI_RESOURCE, AZURE_OPENAI_DEPLOYMENT, AZURE_OPENAI_API_VERSION
//!     let client = AzureImageEditClient::builder().build()?;
//!     let request = ImageEditRequest::new("Place the cat on the beach", "assets/cat.png")
//!         .with_background("assets/beach.jpg");
//!     let output = request.output_path();
//!     client.edit_to_file(&request, &output).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `azedit` command-line binary

pub mod auth;
pub mod config;
mod error;
pub mod image;
pub mod prompt;

// Re-export error types at crate root
pub use error::{AzEditError, Result};

pub use auth::{DefaultCredentialProvider, StaticTokenProvider, TokenProvider};
pub use config::AzureOpenAiConfig;
pub use image::{
    AzureImageEditClient, AzureImageEditClientBuilder, GeneratedImage, ImageEditRequest,
    ImageEditor, ImageEditorExt, ImageFormat,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{AzEditError, Result};
    pub use crate::image::{
        AzureImageEditClient, GeneratedImage, ImageEditRequest, ImageEditor, ImageEditorExt,
    };
}
