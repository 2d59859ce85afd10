//! Image editor trait and utilities.

use crate::error::Result;
use crate::image::types::{GeneratedImage, ImageEditRequest};
use async_trait::async_trait;
use std::path::Path;

/// Trait for backends that turn an edit request into an image.
#[async_trait]
pub trait ImageEditor: Send + Sync {
    /// Edits or composites the request's images.
    async fn edit(&self, request: &ImageEditRequest) -> Result<GeneratedImage>;

    /// Returns the name of this editor for display.
    fn name(&self) -> &str;
}

/// Extension trait for editors that persist their output.
#[async_trait]
pub trait ImageEditorExt: ImageEditor {
    /// Runs [`ImageEditor::edit`] and writes the image to `output`, creating
    /// the parent directory. Nothing is written unless the edit succeeded.
    async fn edit_to_file(
        &self,
        request: &ImageEditRequest,
        output: &Path,
    ) -> Result<GeneratedImage> {
        let image = self.edit(request).await?;
        image.save(output)?;
        tracing::info!(
            editor = self.name(),
            path = %output.display(),
            bytes = image.size(),
            "image saved"
        );
        Ok(image)
    }
}

impl<T: ImageEditor + ?Sized> ImageEditorExt for T {}
