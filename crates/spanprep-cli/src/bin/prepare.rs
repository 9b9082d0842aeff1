//! Corpus Preparation CLI
//!
//! Reads a BIO-tagged corpus, splits it into train/dev subsets and writes
//! token-aligned JSON-lines artifacts for the downstream trainer.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use spanprep_core::config::PrepareConfig;
use spanprep_core::conll::parse_file;
use spanprep_core::convert::{convert_examples, write_docs};
use spanprep_core::segment::{HfSegmenter, Segmenter, WhitespaceSegmenter};
use spanprep_core::split::split_examples;

/// CLI arguments
#[derive(Parser)]
#[command(name = "prepare")]
#[command(about = "Convert a BIO-tagged corpus into span-annotated train/dev datasets")]
#[command(version)]
struct Cli {
    /// Labeled corpus file (one 'TOKEN TAG' pair per line, blank line between sentences)
    #[arg(
        short,
        long,
        default_value = "labeled_telegram_product_price_location.txt"
    )]
    corpus: PathBuf,

    /// Directory receiving train.jsonl and dev.jsonl
    #[arg(short, long, default_value = "data")]
    out_dir: PathBuf,

    /// Fraction of examples assigned to the training set
    #[arg(short, long, default_value_t = 0.8)]
    ratio: f64,

    /// Optional Hugging Face tokenizer.json to align spans against;
    /// whitespace segmentation is used when omitted
    #[arg(short, long)]
    tokenizer: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = PrepareConfig::new()
        .with_corpus(cli.corpus)
        .with_out_dir(&cli.out_dir)
        .with_ratio(cli.ratio);

    info!("parsing corpus {}", config.corpus.display());
    let examples = parse_file(&config.corpus)
        .with_context(|| format!("failed to parse corpus {}", config.corpus.display()))?;
    info!("parsed {} examples", examples.len());

    let (train, dev) = split_examples(examples, config.split_ratio)?;
    info!("split into {} train / {} dev examples", train.len(), dev.len());

    let segmenter: Box<dyn Segmenter> = match &cli.tokenizer {
        Some(path) => {
            info!("aligning spans against tokenizer {}", path.display());
            Box::new(HfSegmenter::from_file(path)?)
        }
        None => Box::new(WhitespaceSegmenter::new()),
    };

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create output directory {}", cli.out_dir.display()))?;

    let train_docs = convert_examples(&train, segmenter.as_ref())?;
    write_docs(&config.train_out, &train_docs)?;
    info!(
        "wrote {} documents to {}",
        train_docs.len(),
        config.train_out.display()
    );

    let dev_docs = convert_examples(&dev, segmenter.as_ref())?;
    write_docs(&config.dev_out, &dev_docs)?;
    info!(
        "wrote {} documents to {}",
        dev_docs.len(),
        config.dev_out.display()
    );

    Ok(())
}
