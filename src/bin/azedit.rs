//! CLI for azedit - image editing through Azure OpenAI.

use anyhow::Context;
use azedit::image::{derive_output_path, validate_size, DEFAULT_SIZE};
use azedit::prompt::{load_prompt, PromptSource};
use azedit::{AzureImageEditClient, AzureOpenAiConfig, ImageEditRequest, ImageEditorExt};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "azedit")]
#[command(about = "Edit or composite images with the Azure OpenAI images/edits endpoint")]
#[command(version)]
struct Cli {
    /// The text prompt, or a path to a file containing it
    #[arg(short, long)]
    prompt: String,

    /// The foreground input image
    #[arg(short, long)]
    input: PathBuf,

    /// Background image to composite the foreground onto
    #[arg(short, long)]
    background: Option<PathBuf>,

    /// Image size as <width>x<height>, or auto
    #[arg(short, long, default_value = DEFAULT_SIZE)]
    size: String,

    /// Output file path (default: <input>_generated.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if dotenv::dotenv().is_err() {
        eprintln!("No .env file found");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    edit_image(cli).await
}

fn ensure_exists(path: &Path, what: &str) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("{} not found: {}", what, path.display());
    }
    Ok(())
}

async fn edit_image(cli: Cli) -> anyhow::Result<()> {
    let config = AzureOpenAiConfig::from_env()?;

    let (prompt, source) = load_prompt(&cli.prompt).context("reading prompt")?;
    ensure_exists(&cli.input, "Input image")?;
    if let Some(ref bg) = cli.background {
        ensure_exists(bg, "Background image")?;
    }
    validate_size(&cli.size)?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&cli.input));

    let mut request = ImageEditRequest::new(prompt, &cli.input).with_size(&cli.size);
    if let Some(ref bg) = cli.background {
        request = request.with_background(bg);
    }

    if !cli.json {
        println!("Generating image with Azure OpenAI...");
        match &source {
            PromptSource::File(path) => println!("Prompt:     (from {})", path.display()),
            PromptSource::Inline => println!("Prompt:     {}", request.prompt),
        }
        if let Some(ref bg) = request.background {
            println!("Background: {}", bg.display());
        }
        println!("Foreground: {}", request.foreground.display());
        println!("Output:     {}", output.display());
        println!("Size:       {}\n", request.size);
        println!(
            "Using image edits endpoint (api-version: {})...",
            config.api_version
        );
    }

    let client = AzureImageEditClient::builder()
        .config(config)
        .build()
        .context("creating Azure OpenAI client")?;

    let image = client.edit_to_file(&request, &output).await?;

    if cli.json {
        let result = serde_json::json!({
            "type": "image",
            "success": true,
            "output": output.display().to_string(),
            "size_bytes": image.size(),
            "format": image.format.map(|f| f.extension()),
            "deployment": image.metadata.deployment,
            "duration_ms": image.metadata.duration_ms,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("✅ Image edit successful");
        println!("Image saved to {}", output.display());
        println!("Size: {:.2} MB", image.size_mb());
        if let Some(duration) = image.metadata.duration_ms {
            println!("Duration: {}ms", duration);
        }
    }

    Ok(())
}
