//! Component 2 – the functional core.
//!
//! Text in, `Document` out. Everything below this module is pure apart from
//! the `Reporter` calls.
pub mod ast;
pub mod lexer;
pub mod lookahead;
pub mod report;
pub mod script_parser;
pub mod syntax;

pub use report::{Collector, Reporter, TracingReporter, Warning};
pub use script_parser::{ErrorHook, parse, parse_with};

use crate::config::ParserOptions;
use crate::model::Document;
use anyhow::{Result, anyhow};

/// Parses one script for the command-line driver.
///
/// In strict mode every syntax error is collected and logged, and the run
/// fails once the whole file has been read.
pub fn run(source: &str, text: &str, options: &ParserOptions) -> Result<Document> {
    let mut errors = Vec::<String>::new();
    let mut collect = |msg: &str| errors.push(msg.to_string());

    let hook: Option<ErrorHook<'_>> = if options.strict {
        Some(&mut collect)
    } else {
        None
    };
    let document = parse(source, text, options, hook)?;

    for msg in &errors {
        tracing::error!("{msg}");
    }
    if !errors.is_empty() {
        return Err(anyhow!("{} syntax error(s) in {}", errors.len(), source));
    }

    let triggers: usize = document.topics.values().map(|t| t.triggers.len()).sum();
    tracing::info!(
        source,
        topics = document.topics.len(),
        triggers,
        objects = document.objects.len(),
        "script parsed"
    );
    Ok(document)
}
