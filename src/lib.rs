//! # csvrow
//!
//! Row-oriented CSV tokenizer. Physical lines go in, logical rows of nullable
//! columns come out:
//!
//! - quoted columns spanning several physical lines
//! - doubled quotes (`""`) and configurable escape characters, with the
//!   backslash escape table (`\t`, `\b`, `\n`, `\r`, `\'`, `\"`, `\\`)
//! - configurable delimiter, quote and escape characters
//! - comment-line skipping through pluggable matchers
//! - optional trimming of unquoted surrounding spaces
//!
//! ## Quick Start
//!
//! ```
//! use csvrow::csv::{excel_preference, LineReader, Tokenizer};
//!
//! let text = "name,notes\n\"Ann\",\"two\nlines\"\n";
//! let mut tokenizer = Tokenizer::new(LineReader::from_text(text), &excel_preference());
//!
//! let mut columns = Vec::new();
//! while tokenizer.read_columns(&mut columns).unwrap() {
//!     println!("{:?} <- {:?}", columns, tokenizer.raw_row_text());
//! }
//! ```
//!
//! For row-by-row reading of files with header support, see
//! [`csv_reader::CsvReader`].

pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod types;

pub use csv::{CsvPreference, Tokenizer};
pub use csv_reader::CsvReader;
pub use error::{CsvError, Result, TokenizeError};
pub use types::{Column, CsvContext};
