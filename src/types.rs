//! Type definitions shared by the tokenizer and the writing-path strategies

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single tokenized column: `None` for an empty unquoted field
pub type Column = Option<String>;

/// Position of a column within the CSV stream
///
/// All numbers are 1-based. The line number is the physical line, so it can be
/// ahead of the row number when quoted columns span several lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CsvContext {
    /// Physical line currently being read
    pub line_number: usize,
    /// Logical CSV row
    pub row_number: usize,
    /// Column within the row
    pub column_number: usize,
}

impl CsvContext {
    /// Create a new context
    pub fn new(line_number: usize, row_number: usize, column_number: usize) -> Self {
        CsvContext {
            line_number,
            row_number,
            column_number,
        }
    }
}

impl fmt::Display for CsvContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line={}, row={}, column={}",
            self.line_number, self.row_number, self.column_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let ctx = CsvContext::new(4, 3, 2);
        assert_eq!(ctx.to_string(), "line=4, row=3, column=2");
    }
}
