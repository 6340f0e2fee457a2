//! Docket CLI - name legal documents after what they contain.

use clap::Parser;
use docket_cli::config::NerBackend;
use docket_cli::export::write_export;
use docket_cli::{
    rename_document, Cli, Config, DocumentReader, ExportDocument, Formatter, OcrTextExtractor,
    Report,
};
use docket_domain::traits::EntityExtractor;
use docket_extractor::{LlmEntityExtractor, PatternEntityExtractor, Pipeline};
use docket_llm::OllamaProvider;
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> docket_cli::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(format) = cli.format {
        config.settings.format = format.into();
    }
    if let Some(output_dir) = cli.output_dir.clone() {
        config.settings.output_dir = output_dir;
    }
    if let Some(ner) = cli.ner {
        config.settings.ner = ner.into();
    }
    if let Some(model) = cli.model.clone() {
        config.settings.ollama_model = model;
    }

    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(config.settings.format, color_enabled);

    let mut reader = DocumentReader::new();
    if cli.ocr || config.settings.ocr {
        reader = reader.with_ocr(OcrTextExtractor::new());
    }
    let text = reader.read(&cli.file)?;

    match config.settings.ner {
        NerBackend::Pattern => {
            let pipeline = Pipeline::new(PatternEntityExtractor::new(), config.pipeline.clone())?;
            execute(&cli, &config, &formatter, &pipeline, &text).await
        }
        NerBackend::Ollama => {
            // One attempt per chunk, each bounded by the extraction timeout
            let provider = OllamaProvider::new(
                config.settings.ollama_endpoint.clone(),
                config.settings.ollama_model.clone(),
            )
            .with_max_retries(1)
            .with_timeout(config.pipeline.extraction.timeout());
            let extractor =
                LlmEntityExtractor::new(provider, config.pipeline.extraction.max_chunk_size);
            let pipeline = Pipeline::new(extractor, config.pipeline.clone())?;
            execute(&cli, &config, &formatter, &pipeline, &text).await
        }
    }
}

async fn execute<E>(
    cli: &Cli,
    config: &Config,
    formatter: &Formatter,
    pipeline: &Pipeline<E>,
    text: &str,
) -> docket_cli::Result<()>
where
    E: EntityExtractor + Send + Sync + 'static,
    E::Error: std::fmt::Display,
{
    let document = pipeline.process(text).await?;
    let new_name = pipeline.filename_for(document.summary(), &extension_of(&cli.file));

    if cli.dry_run {
        println!("{}", new_name);
        return Ok(());
    }

    let export = ExportDocument::new(&cli.file, &document);
    let export_path = write_export(&config.settings.output_dir, &export, &cli.file)?;

    let renamed_to = if cli.rename {
        match rename_document(&cli.file, &new_name) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Keeping original name: {}", e);
                eprintln!("{}", formatter.warning(&e.to_string()));
                None
            }
        }
    } else {
        None
    };

    let report = Report {
        export: &export,
        new_name: &new_name,
        export_path: Some(export_path),
        renamed_to,
    };
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}

/// Source extension with its leading dot, or empty
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}
