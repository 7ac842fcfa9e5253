use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config::{self, Concat, ParserOptions};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input script file
    pub input: PathBuf,
    /// Output .json file (stdout when omitted)
    pub output: Option<PathBuf>,
    /// JSON file with parser options
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Report syntax errors as warnings instead of failing
    #[arg(long)]
    pub lenient: bool,
    /// Accept non-ASCII triggers
    #[arg(long)]
    pub utf8: bool,
    /// Accept uppercase topic names
    #[arg(long)]
    pub force_case: bool,
    /// Default continuation separator: none, newline or space
    #[arg(long)]
    pub concat: Option<Concat>,
}

impl Cli {
    /// Defaults, then the config file, then flags.
    pub fn options(&self) -> Result<ParserOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Reading {}", path.display()))?;
                config::load_options(&json)
                    .with_context(|| format!("Parsing {}", path.display()))?
            }
            None => ParserOptions::default(),
        };

        if self.lenient {
            options.strict = false;
        }
        if self.utf8 {
            options.utf8 = true;
        }
        if self.force_case {
            options.force_case = true;
        }
        if let Some(concat) = self.concat {
            options.concat = concat;
        }
        Ok(options)
    }
}
