//! Error types for CSV tokenizing and configuration

use thiserror::Error;

/// Errors raised while configuring or tokenizing CSV
#[derive(Error, Debug)]
pub enum CsvError {
    /// A quoted column was still open when the line source ran dry
    #[error(
        "unexpected end of file while reading quoted column beginning on line {start_line} and ending on line {end_line}"
    )]
    UnterminatedQuotedField { start_line: usize, end_line: usize },

    /// A non-backslash escape character was followed by something other than itself or the quote
    #[error(
        "unexpected character '{found}' after the escape character '{escape_char}' while reading quoted column beginning on line {start_line} and ending on line {end_line}"
    )]
    MalformedEscapeSequence {
        found: char,
        escape_char: char,
        start_line: usize,
        end_line: usize,
    },

    /// Preferences or collaborators rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A mandatory argument was absent
    #[error("{0} should not be null")]
    NullArgument(&'static str),

    /// Header requested after data rows were already consumed
    #[error("CSV header must be fetched as the first read operation")]
    HeaderNotFirst,

    /// Failure of the underlying line source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type returned by [`crate::csv::Tokenizer::read_columns`]
pub type TokenizeError = CsvError;

/// Result type alias
pub type Result<T> = std::result::Result<T, CsvError>;
