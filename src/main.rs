// src/main.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_renderer::{render, template_ids, OutputFormat, RenderOptions, RenderedDocument, ResumeData};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Pdf,
}

#[derive(Parser, Debug)]
#[command(name = "resumake", about = "Render a resume JSON file to HTML or PDF")]
struct Args {
    /// Path to the resume data JSON file
    input: PathBuf,

    /// Template id (unknown ids fall back to the default template)
    #[arg(short, long, default_value = "classic")]
    template: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Overlay preview watermark marks
    #[arg(short, long)]
    watermark: bool,

    /// Output path; defaults to the input path with the format's extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List available template ids and exit
    #[arg(long)]
    list_templates: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if args.list_templates {
        for id in template_ids() {
            println!("{}", id);
        }
        return Ok(());
    }

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let data: ResumeData = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse resume data from {}", args.input.display()))?;

    let (format, extension) = match args.format {
        Format::Html => (OutputFormat::Html, "html"),
        Format::Pdf => (OutputFormat::Pdf, "pdf"),
    };
    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension(extension));

    let options = RenderOptions {
        watermark: args.watermark,
    };
    let rendered = render(&data, &args.template, format, &options).await?;
    match rendered {
        RenderedDocument::Html(html) => std::fs::write(&output, html),
        RenderedDocument::Pdf(bytes) => std::fs::write(&output, bytes),
    }
    .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Rendered {} with template '{}' to {}",
        args.input.display(),
        args.template,
        output.display()
    );
    Ok(())
}
