pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod processor;
pub mod writer;

pub use config::{Concat, ParserOptions};
pub use error::ParseError;
pub use model::Document;
pub use processor::{parse, parse_with};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_tracing();

    // 1. ── Configure ──────────────────────────────────────────────────
    let options = args.options().with_context(|| "Loading parser options")?;

    // 2. ── Parse ──────────────────────────────────────────────────────
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;
    let source = args.input.display().to_string();
    let document = processor::run(&source, &text, &options)
        .with_context(|| format!("Parsing {source}"))?;

    // 3. ── Write output ───────────────────────────────────────────────
    match &args.output {
        Some(path) => writer::json::emit(&document, path)
            .with_context(|| format!("Writing {}", path.display()))?,
        None => writer::json::print(&document).with_context(|| "Writing to stdout")?,
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
