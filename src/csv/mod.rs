//! CSV preferences, tokenizing and column encoding

mod comment;
mod encoder;
mod line_reader;
mod prefs;
mod quote;
mod tokenizer;

pub use comment::{CommentMatcher, CommentMatches, CommentStartsWith};
pub use encoder::{CsvEncoder, DefaultCsvEncoder};
pub use line_reader::{LineReader, LineSource};
pub use prefs::{
    excel_north_europe_preference, excel_preference, standard_preference, tab_preference, Builder,
    CsvPreference,
};
pub use quote::{AlwaysQuoteMode, ColumnQuoteMode, NormalQuoteMode, QuoteMode};
pub use tokenizer::Tokenizer;
