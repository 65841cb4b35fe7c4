//! JSON-lines front end for spanfold conversions.
//!
//! Reads one document per stdin line and writes one result per stdout line.
//! A line that fails to convert produces `{"error": "..."}` and processing
//! continues with the next line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use spanfold_core::{
    ConversionConfig, HfEncoder, IndicoDocument, PredictedDocument, RegexWordTokenizer,
    SequenceConverter, SubwordEncoder, TracingSink, WordLevelEncoder,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "spanfold-convert")]
#[command(about = "Convert between span annotations and labeled substrings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit single labels and reject overlapping annotations
    #[arg(long, env = "SPANFOLD_SINGLE_LABEL")]
    single_label: bool,

    /// Label marking unlabeled text
    #[arg(long, env = "SPANFOLD_NONE_VALUE", default_value = "<PAD>")]
    none_value: String,

    /// Keep predicted boundaries instead of snapping them to whole words
    #[arg(long)]
    subtoken_predictions: bool,

    /// Widen annotations to whole subword tokens before merging
    #[arg(long)]
    whole_token_labels: bool,

    /// Hugging Face tokenizer.json used as the subword encoder
    #[arg(short, long, env = "SPANFOLD_TOKENIZER")]
    tokenizer: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Annotated documents to labeled substrings
    ToFinetune,
    /// Predicted substrings to annotated documents
    ToIndico,
}

#[derive(Serialize)]
struct ErrorLine {
    error: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConversionConfig::new()
        .with_multi_label(!cli.single_label)
        .with_none_value(cli.none_value.as_str())
        .with_subtoken_predictions(cli.subtoken_predictions)
        .with_subtoken_labels(!cli.whole_token_labels);

    let words = RegexWordTokenizer::new()?;
    let encoder: Box<dyn SubwordEncoder> = match &cli.tokenizer {
        Some(path) => {
            info!("Loading tokenizer from {}", path.display());
            Box::new(
                HfEncoder::from_file(path)
                    .with_context(|| format!("failed to load tokenizer {}", path.display()))?,
            )
        }
        None => Box::new(WordLevelEncoder::new(words.clone())),
    };
    let converter = SequenceConverter::new(encoder, words, config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut sink = TracingSink;

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = match cli.command {
            Commands::ToFinetune => convert_line(index, line, |doc: IndicoDocument| {
                converter.to_finetune_document(&doc)
            })?,
            Commands::ToIndico => convert_line(index, line, |doc: PredictedDocument| {
                converter.to_indico_document(index, &doc, &mut sink)
            })?,
        };
        writeln!(out, "{}", output)?;
    }

    Ok(())
}

/// Parses one input line, converts it and renders the result or the error as JSON.
fn convert_line<T, R>(
    index: usize,
    line: &str,
    convert: impl FnOnce(T) -> spanfold_core::Result<R>,
) -> Result<String>
where
    T: DeserializeOwned,
    R: Serialize,
{
    let result = serde_json::from_str::<T>(line)
        .map_err(|e| format!("invalid input: {}", e))
        .and_then(|doc| convert(doc).map_err(|e| e.to_string()));

    let json = match result {
        Ok(value) => serde_json::to_string(&value)?,
        Err(error) => {
            warn!(line = index, "{}", error);
            serde_json::to_string(&ErrorLine { error })?
        }
    };
    Ok(json)
}
