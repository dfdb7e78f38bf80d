//! Quote modes deciding when a column is quoted on the writing path

use crate::csv::CsvPreference;
use crate::types::CsvContext;
use std::collections::HashSet;

/// Strategy forcing surrounding quotes on columns that would not otherwise need them
pub trait QuoteMode: Send + Sync {
    /// Returns `true` if `column` must be quoted regardless of its content
    fn quotes_required(&self, column: &str, context: &CsvContext, preference: &CsvPreference)
        -> bool;
}

/// Quotes only when the content demands it
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalQuoteMode;

impl QuoteMode for NormalQuoteMode {
    fn quotes_required(&self, _: &str, _: &CsvContext, _: &CsvPreference) -> bool {
        false
    }
}

/// Quotes every column
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysQuoteMode;

impl QuoteMode for AlwaysQuoteMode {
    fn quotes_required(&self, _: &str, _: &CsvContext, _: &CsvPreference) -> bool {
        true
    }
}

/// Quotes the listed columns (1-based)
#[derive(Debug, Clone, Default)]
pub struct ColumnQuoteMode {
    columns: HashSet<usize>,
}

impl ColumnQuoteMode {
    /// Create a quote mode for the given 1-based column numbers
    pub fn new(columns: impl IntoIterator<Item = usize>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }
}

impl QuoteMode for ColumnQuoteMode {
    fn quotes_required(&self, _: &str, context: &CsvContext, _: &CsvPreference) -> bool {
        self.columns.contains(&context.column_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::excel_preference;

    #[test]
    fn test_column_quote_mode() {
        let prefs = excel_preference();
        let mode = ColumnQuoteMode::new([1, 3]);
        assert!(mode.quotes_required("x", &CsvContext::new(1, 1, 1), &prefs));
        assert!(!mode.quotes_required("x", &CsvContext::new(1, 1, 2), &prefs));
        assert!(mode.quotes_required("x", &CsvContext::new(1, 1, 3), &prefs));
    }

    #[test]
    fn test_fixed_modes() {
        let prefs = excel_preference();
        let ctx = CsvContext::new(1, 1, 1);
        assert!(AlwaysQuoteMode.quotes_required("x", &ctx, &prefs));
        assert!(!NormalQuoteMode.quotes_required("x", &ctx, &prefs));
    }
}
