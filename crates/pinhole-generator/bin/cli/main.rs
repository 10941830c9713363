mod cli;

use crate::cli::CLI;
use clap::Parser;
use pinhole_core::{Alphabet, Filters, GenerationRequest};
use pinhole_generator::{Generator, IdGenerator};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = CLI::try_parse()?;

    let alphabet = match &config.symbols {
        Some(symbols) => Alphabet::new(symbols)?,
        None => config.alphabet.alphabet(),
    };

    let filters = Filters {
        first_char: config.first_char.map(Into::into),
        excluded: config.exclude.chars().collect(),
    };

    let alphabet_name = config
        .symbols
        .clone()
        .unwrap_or_else(|| config.alphabet.to_string());
    info!(
        length = config.length,
        alphabet = %alphabet_name,
        count = config.count,
        "generating identifiers"
    );

    let request = GenerationRequest::builder()
        .length(config.length)
        .alphabet(alphabet)
        .filters(filters)
        .build();
    let generator = IdGenerator::new(request)?;

    let mut stdout = std::io::stdout().lock();
    for _ in 0..config.count {
        writeln!(stdout, "{}", generator.generate()?)?;
    }

    Ok(())
}
