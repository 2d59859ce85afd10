//! Image editing example - composites a foreground onto a background.
//!
//! Run with: `cargo run --example edit_image -- <foreground.png> [background.png]`
//!
//! Requires `AZURE_OPENAI_RESOURCE`, `AZURE_OPENAI_DEPLOYMENT` and
//! `AZURE_OPENAI_API_VERSION`, plus an Azure credential (e.g. `az login`).

use azedit::{AzureImageEditClient, ImageEditRequest, ImageEditorExt};

#[tokio::main]
async fn main() -> azedit::Result<()> {
    let mut args = std::env::args().skip(1);
    let foreground = args
        .next()
        .expect("Usage: edit_image <foreground.png> [background.png]");

    let client = AzureImageEditClient::builder().build()?;

    let mut request = ImageEditRequest::new(
        "Place the subject naturally in the scene with matching warm lighting",
        &foreground,
    );
    if let Some(background) = args.next() {
        request = request.with_background(background);
    }

    let output = request.output_path();
    let image = client.edit_to_file(&request, &output).await?;
    println!(
        "Edited image saved to {} ({} bytes)",
        output.display(),
        image.size()
    );

    Ok(())
}
