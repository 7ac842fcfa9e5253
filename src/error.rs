use thiserror::Error;

/// The only condition that stops a parse. Everything else is reported and
/// skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{file} line {line}: document declares version {declared}, only {supported:.1} is supported")]
    UnsupportedVersion {
        declared: String,
        supported: f64,
        file: String,
        line: usize,
    },
}
