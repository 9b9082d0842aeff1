//! Model Smoke Tester
//!
//! Loads a trained NER checkpoint (preferring `models/model-best` over
//! `models/model-last`), runs it over a fixed set of sample listings and
//! then over interactive input until `quit`.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use spanprep_core::model::NerModel;

/// Listings from the labeled corpus domain: Telegram product posts mixing
/// Amharic and English, with prices and locations.
const SAMPLE_TEXTS: &[&str] = &[
    "ዋጋ፦ 6800 ብር",
    "BARDEFU 2 IN 1 Multi purpose juicer",
    "አዲስ ስልክ iPhone 15 Pro Max ዋጋ 85000 ብር አድራሻ ፒያሳ",
    "የሚሸጥ መኪና ዋጋ 2 ሚሊዮን ብር",
    "ምርጥ ቡና በዋጋ 150 ብር በኪሎ",
    "Phone price 500 birr at Bole Addis Ababa",
];

fn print_entities(model: &NerModel, text: &str) -> Result<()> {
    let entities = model.predict(text)?;
    if entities.is_empty() {
        println!("  - No entities found.");
        return Ok(());
    }
    for entity in entities {
        println!(
            "  - Entity: '{}' | Label: '{}' | Span: ({}, {})",
            entity.text, entity.label, entity.start, entity.end
        );
    }
    Ok(())
}

fn run() -> Result<()> {
    let model_dir = NerModel::locate(Path::new("models")).ok_or_else(|| {
        anyhow!("no trained model found under models/ (expected model-best or model-last)")
    })?;

    println!("Loading model from: {}", model_dir.display());
    let model = NerModel::load(&model_dir)
        .with_context(|| format!("failed to load model from {}", model_dir.display()))?;
    println!("Model loaded successfully!");

    println!("\n--- Testing model with predefined texts ---");
    for (i, text) in SAMPLE_TEXTS.iter().enumerate() {
        println!("\nText {}: '{}'", i + 1, text);
        print_entities(&model, text)?;
    }

    println!("\n--- Testing model with user input ---");
    let stdin = io::stdin();
    loop {
        print!("\nEnter text to extract entities (or 'quit' to exit): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") {
            break;
        }
        if input.is_empty() {
            continue;
        }
        print_entities(&model, input)?;
    }

    println!("\nExiting smoke test.");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run() {
        eprintln!("Smoke test failed: {e:#}");
        std::process::exit(1);
    }
}
