//! Dump the parsed document tree as JSON.

use crate::model::Document;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn emit(document: &Document, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write(document, &mut out)?;
    out.flush()
}

pub fn print(document: &Document) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write(document, &mut out)?;
    out.flush()
}

fn write<W: Write>(document: &Document, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, document)?;
    writeln!(out)
}
