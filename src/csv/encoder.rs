//! Column encoding for the writing path

use crate::csv::quote::QuoteMode;
use crate::csv::CsvPreference;
use crate::types::CsvContext;

/// Strategy turning a raw column value into its CSV representation
pub trait CsvEncoder: Send + Sync {
    /// Encode a single column, adding quotes and escapes as required
    fn encode(&self, column: &str, context: &CsvContext, preference: &CsvPreference) -> String;
}

/// Default encoder with RFC 4180-like behavior
///
/// Quote characters are doubled, line breaks are normalized to the
/// preference's end-of-line symbols, and the column is quoted when it contains
/// the delimiter, a quote or a line break.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCsvEncoder;

impl CsvEncoder for DefaultCsvEncoder {
    fn encode(&self, column: &str, context: &CsvContext, preference: &CsvPreference) -> String {
        let quote = preference.quote_char();
        let delimiter = preference.delimiter_char();
        let eol = preference.end_of_line_symbols();

        let mut buffer = String::with_capacity(column.len() + 2);
        let mut needs_quotes = false;
        let mut chars = column.chars().peekable();

        while let Some(c) = chars.next() {
            if c == quote {
                // Escape quotes by doubling: " -> ""
                buffer.push(quote);
                buffer.push(quote);
                needs_quotes = true;
            } else if c == delimiter {
                buffer.push(c);
                needs_quotes = true;
            } else if c == '\r' {
                buffer.push_str(eol);
                needs_quotes = true;
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            } else if c == '\n' {
                buffer.push_str(eol);
                needs_quotes = true;
            } else {
                buffer.push(c);
            }
        }

        let surrounding_spaces = preference.surrounding_spaces_need_quotes()
            && (column.starts_with(' ') || column.ends_with(' '));

        if needs_quotes
            || surrounding_spaces
            || preference
                .quote_mode()
                .quotes_required(column, context, preference)
        {
            let mut quoted = String::with_capacity(buffer.len() + 2);
            quoted.push(quote);
            quoted.push_str(&buffer);
            quoted.push(quote);
            quoted
        } else {
            buffer
        }
    }
}
