//! CSV preferences: delimiter, quote and escape characters plus pluggable collaborators
//!
//! Preferences are built once through a validating [`Builder`] and are
//! immutable afterwards. Cloning is cheap: the collaborators are shared
//! behind `Arc`, so one preference can back any number of tokenizers.
//!
//! | Preference | Quote | Delimiter | End of line |
//! |---|---|---|---|
//! | [`standard_preference`] | `"` | `,` | `\r\n` |
//! | [`excel_preference`] | `"` | `,` | `\n` |
//! | [`excel_north_europe_preference`] | `"` | `;` | `\n` |
//! | [`tab_preference`] | `"` | `\t` | `\n` |
//!
//! The end of line symbols are only used when writing.

use crate::csv::comment::CommentMatcher;
use crate::csv::encoder::{CsvEncoder, DefaultCsvEncoder};
use crate::csv::quote::{NormalQuoteMode, QuoteMode};
use crate::error::{CsvError, Result};
use std::fmt;
use std::sync::Arc;

/// Ready to use configuration that should cover most usages
pub fn standard_preference() -> CsvPreference {
    Builder::canned('"', ',', "\r\n").build()
}

/// Configuration for CSV files exported by Excel on Windows
pub fn excel_preference() -> CsvPreference {
    Builder::canned('"', ',', "\n").build()
}

/// Configuration for north European Excel files (`;` separated)
pub fn excel_north_europe_preference() -> CsvPreference {
    Builder::canned('"', ';', "\n").build()
}

/// Configuration for tab-delimited files
pub fn tab_preference() -> CsvPreference {
    Builder::canned('"', '\t', "\n").build()
}

/// Immutable CSV configuration
#[derive(Clone)]
pub struct CsvPreference {
    quote_char: char,
    escape_char: char,
    delimiter_char: char,
    end_of_line_symbols: String,
    surrounding_spaces_need_quotes: bool,
    encoder: Arc<dyn CsvEncoder>,
    quote_mode: Arc<dyn QuoteMode>,
    comment_matcher: Option<Arc<dyn CommentMatcher>>,
}

impl CsvPreference {
    /// Start a builder with the mandatory values
    ///
    /// Fails with [`CsvError::InvalidConfiguration`] if the quote or escape
    /// character equals the delimiter, or if no end of line symbols are given.
    /// Quote and escape may be the same character (the RFC 4180 style `""`).
    ///
    /// ```
    /// use csvrow::csv::CsvPreference;
    ///
    /// let pipes = CsvPreference::builder('"', '|', Some("\n"), '"')
    ///     .unwrap()
    ///     .build();
    /// assert_eq!(pipes.delimiter_char(), '|');
    /// ```
    pub fn builder(
        quote_char: char,
        delimiter_char: char,
        end_of_line_symbols: Option<&str>,
        escape_char: char,
    ) -> Result<Builder> {
        if quote_char == delimiter_char {
            return Err(CsvError::InvalidConfiguration(format!(
                "quoteChar and delimiterChar should not be the same character: {}",
                quote_char
            )));
        }
        if escape_char == delimiter_char {
            return Err(CsvError::InvalidConfiguration(format!(
                "escapeChar and delimiterChar should not be the same character: {}",
                escape_char
            )));
        }
        let end_of_line_symbols = end_of_line_symbols.ok_or_else(|| {
            CsvError::InvalidConfiguration("endOfLineSymbols should not be null".to_string())
        })?;

        Ok(Builder {
            quote_char,
            escape_char,
            delimiter_char,
            end_of_line_symbols: end_of_line_symbols.to_string(),
            surrounding_spaces_need_quotes: false,
            encoder: None,
            quote_mode: None,
            comment_matcher: None,
        })
    }

    /// Start a builder carrying every value of an existing preference
    pub fn builder_from(preference: &CsvPreference) -> Builder {
        Builder {
            quote_char: preference.quote_char,
            escape_char: preference.escape_char,
            delimiter_char: preference.delimiter_char,
            end_of_line_symbols: preference.end_of_line_symbols.clone(),
            surrounding_spaces_need_quotes: preference.surrounding_spaces_need_quotes,
            encoder: Some(Arc::clone(&preference.encoder)),
            quote_mode: Some(Arc::clone(&preference.quote_mode)),
            comment_matcher: preference.comment_matcher.clone(),
        }
    }

    pub fn quote_char(&self) -> char {
        self.quote_char
    }

    pub fn escape_char(&self) -> char {
        self.escape_char
    }

    pub fn delimiter_char(&self) -> char {
        self.delimiter_char
    }

    /// Line terminator used when writing
    pub fn end_of_line_symbols(&self) -> &str {
        &self.end_of_line_symbols
    }

    /// Whether unquoted spaces around a column are trimmed on read (and quoted on write)
    pub fn surrounding_spaces_need_quotes(&self) -> bool {
        self.surrounding_spaces_need_quotes
    }

    pub fn encoder(&self) -> &Arc<dyn CsvEncoder> {
        &self.encoder
    }

    pub fn quote_mode(&self) -> &Arc<dyn QuoteMode> {
        &self.quote_mode
    }

    /// Comment matcher, if comment skipping is enabled
    pub fn comment_matcher(&self) -> Option<&Arc<dyn CommentMatcher>> {
        self.comment_matcher.as_ref()
    }

    /// Returns `true` if the raw line is a comment under this preference
    pub fn is_comment(&self, line: &str) -> bool {
        self.comment_matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_comment(line))
    }
}

impl fmt::Debug for CsvPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvPreference")
            .field("quote_char", &self.quote_char)
            .field("escape_char", &self.escape_char)
            .field("delimiter_char", &self.delimiter_char)
            .field("end_of_line_symbols", &self.end_of_line_symbols)
            .field(
                "surrounding_spaces_need_quotes",
                &self.surrounding_spaces_need_quotes,
            )
            .field("skips_comments", &self.comment_matcher.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`CsvPreference`]
pub struct Builder {
    quote_char: char,
    escape_char: char,
    delimiter_char: char,
    end_of_line_symbols: String,
    surrounding_spaces_need_quotes: bool,
    encoder: Option<Arc<dyn CsvEncoder>>,
    quote_mode: Option<Arc<dyn QuoteMode>>,
    comment_matcher: Option<Arc<dyn CommentMatcher>>,
}

impl Builder {
    /// Builder for the canned configurations, which are valid by construction
    fn canned(quote_char: char, delimiter_char: char, end_of_line_symbols: &str) -> Self {
        Builder {
            quote_char,
            escape_char: quote_char,
            delimiter_char,
            end_of_line_symbols: end_of_line_symbols.to_string(),
            surrounding_spaces_need_quotes: false,
            encoder: None,
            quote_mode: None,
            comment_matcher: None,
        }
    }

    /// Trim unquoted spaces around columns when reading (default `false`)
    pub fn surrounding_spaces_need_quotes(mut self, value: bool) -> Self {
        self.surrounding_spaces_need_quotes = value;
        self
    }

    /// Skip lines matched by `matcher`
    ///
    /// ```
    /// use csvrow::csv::{excel_preference, CommentStartsWith, CsvPreference};
    ///
    /// let prefs = CsvPreference::builder_from(&excel_preference())
    ///     .skip_comments(CommentStartsWith::new("#").unwrap())
    ///     .build();
    /// assert!(prefs.is_comment("# header notes"));
    /// ```
    pub fn skip_comments<M: CommentMatcher + 'static>(mut self, matcher: M) -> Self {
        self.comment_matcher = Some(Arc::new(matcher));
        self
    }

    /// Skip lines matched by a shared matcher, e.g. one taken from another preference
    pub fn skip_comments_shared(mut self, matcher: Option<Arc<dyn CommentMatcher>>) -> Result<Self> {
        self.comment_matcher = Some(matcher.ok_or(CsvError::NullArgument("commentMatcher"))?);
        Ok(self)
    }

    /// Use a custom encoder on the writing path
    pub fn use_encoder<E: CsvEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Some(Arc::new(encoder));
        self
    }

    /// Use a shared encoder on the writing path
    pub fn use_encoder_shared(mut self, encoder: Option<Arc<dyn CsvEncoder>>) -> Result<Self> {
        self.encoder = Some(encoder.ok_or(CsvError::NullArgument("encoder"))?);
        Ok(self)
    }

    /// Use a custom quote mode on the writing path
    pub fn use_quote_mode<Q: QuoteMode + 'static>(mut self, quote_mode: Q) -> Self {
        self.quote_mode = Some(Arc::new(quote_mode));
        self
    }

    /// Use a shared quote mode on the writing path
    pub fn use_quote_mode_shared(mut self, quote_mode: Option<Arc<dyn QuoteMode>>) -> Result<Self> {
        self.quote_mode = Some(quote_mode.ok_or(CsvError::NullArgument("quoteMode"))?);
        Ok(self)
    }

    /// Build the immutable preference, filling in default collaborators
    pub fn build(self) -> CsvPreference {
        CsvPreference {
            quote_char: self.quote_char,
            escape_char: self.escape_char,
            delimiter_char: self.delimiter_char,
            end_of_line_symbols: self.end_of_line_symbols,
            surrounding_spaces_need_quotes: self.surrounding_spaces_need_quotes,
            encoder: self
                .encoder
                .unwrap_or_else(|| Arc::new(DefaultCsvEncoder)),
            quote_mode: self
                .quote_mode
                .unwrap_or_else(|| Arc::new(NormalQuoteMode)),
            comment_matcher: self.comment_matcher,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::comment::CommentStartsWith;

    #[test]
    fn test_canned_preferences() {
        let standard = standard_preference();
        assert_eq!(standard.quote_char(), '"');
        assert_eq!(standard.escape_char(), '"');
        assert_eq!(standard.delimiter_char(), ',');
        assert_eq!(standard.end_of_line_symbols(), "\r\n");

        assert_eq!(excel_preference().end_of_line_symbols(), "\n");
        assert_eq!(excel_north_europe_preference().delimiter_char(), ';');
        assert_eq!(tab_preference().delimiter_char(), '\t');
        assert!(!tab_preference().surrounding_spaces_need_quotes());
        assert!(tab_preference().comment_matcher().is_none());
    }

    #[test]
    fn test_quote_equals_delimiter_rejected() {
        let err = CsvPreference::builder(',', ',', Some("\n"), '\\').err().unwrap();
        assert!(matches!(err, CsvError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("quoteChar and delimiterChar"));
    }

    #[test]
    fn test_escape_equals_delimiter_rejected() {
        let err = CsvPreference::builder('"', ';', Some("\n"), ';').err().unwrap();
        assert!(err.to_string().contains("escapeChar and delimiterChar"));
    }

    #[test]
    fn test_missing_end_of_line_rejected() {
        assert!(matches!(
            CsvPreference::builder('"', ',', None, '"'),
            Err(CsvError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_quote_may_equal_escape() {
        let prefs = CsvPreference::builder('\'', ',', Some("\n"), '\'')
            .unwrap()
            .build();
        assert_eq!(prefs.quote_char(), prefs.escape_char());
    }

    #[test]
    fn test_builder_from_copies_everything() {
        let base = CsvPreference::builder('\'', '|', Some("\r\n"), '\\')
            .unwrap()
            .surrounding_spaces_need_quotes(true)
            .skip_comments(CommentStartsWith::new("#").unwrap())
            .build();
        let copy = CsvPreference::builder_from(&base).build();
        assert_eq!(copy.quote_char(), '\'');
        assert_eq!(copy.escape_char(), '\\');
        assert_eq!(copy.delimiter_char(), '|');
        assert_eq!(copy.end_of_line_symbols(), "\r\n");
        assert!(copy.surrounding_spaces_need_quotes());
        assert!(copy.is_comment("# note"));
    }

    #[test]
    fn test_shared_collaborators_reject_none() {
        let builder = CsvPreference::builder_from(&excel_preference());
        assert!(matches!(
            builder.skip_comments_shared(None),
            Err(CsvError::NullArgument("commentMatcher"))
        ));

        let builder = CsvPreference::builder_from(&excel_preference());
        assert!(matches!(
            builder.use_encoder_shared(None),
            Err(CsvError::NullArgument("encoder"))
        ));

        let builder = CsvPreference::builder_from(&excel_preference());
        assert!(matches!(
            builder.use_quote_mode_shared(None),
            Err(CsvError::NullArgument("quoteMode"))
        ));
    }

    #[test]
    fn test_shared_matcher_from_other_preference() {
        let with_comments = CsvPreference::builder_from(&excel_preference())
            .skip_comments(CommentStartsWith::new("//").unwrap())
            .build();
        let tabbed = CsvPreference::builder_from(&tab_preference())
            .skip_comments_shared(with_comments.comment_matcher().cloned())
            .unwrap()
            .build();
        assert!(tabbed.is_comment("// shared"));
    }

    #[test]
    fn test_no_matcher_means_no_comments() {
        assert!(!excel_preference().is_comment("# looks like a comment"));
    }
}
