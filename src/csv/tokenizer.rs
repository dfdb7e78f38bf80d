//! Row tokenizer: turns physical lines into logical CSV rows
//!
//! One call to [`Tokenizer::read_columns`] produces one logical row. A quoted
//! column may span several physical lines; the tokenizer pulls further lines
//! from its [`LineSource`] until the quote is closed.
//!
//! Characters are classified by a three-state machine:
//!
//! - `Normal`: delimiters split columns, spaces are deferred until it is known
//!   whether they are surrounding or interior, a quote opens a quoted column.
//! - `InQuotes`: everything is data except the quote (closing, or doubled as an
//!   escaped quote) and the escape character.
//! - `AfterEscape`: the single character after an escape, then back to `InQuotes`.

use crate::csv::comment::CommentMatcher;
use crate::csv::line_reader::LineSource;
use crate::csv::CsvPreference;
use crate::error::{CsvError, TokenizeError};
use crate::types::Column;
use std::sync::Arc;
use tracing::{debug, trace};

const BACKSLASH: char = '\\';
const SPACE: char = ' ';
const NEWLINE: char = '\n';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenizerMode {
    Normal,
    InQuotes,
    AfterEscape,
}

/// Per-row parsing state, reset at the start of every read
#[derive(Debug)]
struct RowState {
    mode: TokenizerMode,
    /// Line on which the open quoted column began
    quote_scope_start_line: Option<usize>,
    /// Spaces seen but not yet committed to the column
    pending_spaces: usize,
    char_index: usize,
}

impl RowState {
    fn new() -> Self {
        RowState {
            mode: TokenizerMode::Normal,
            quote_scope_start_line: None,
            pending_spaces: 0,
            char_index: 0,
        }
    }
}

/// Reads logical CSV rows from a line source
///
/// Internal buffers are reused between calls; callers only ever receive owned
/// copies of the column values.
///
/// # Examples
///
/// ```
/// use csvrow::csv::{excel_preference, LineReader, Tokenizer};
///
/// let source = LineReader::from_text("a,,\"b, \"\"c\"\"\"\n");
/// let mut tokenizer = Tokenizer::new(source, &excel_preference());
///
/// let mut columns = Vec::new();
/// assert!(tokenizer.read_columns(&mut columns).unwrap());
/// assert_eq!(
///     columns,
///     vec![Some("a".to_string()), None, Some("b, \"c\"".to_string())]
/// );
/// assert!(!tokenizer.read_columns(&mut columns).unwrap());
/// ```
pub struct Tokenizer<S> {
    source: S,

    // Configuration
    quote_char: char,
    escape_char: char,
    delimiter_char: char,
    surrounding_spaces_need_quotes: bool,
    comment_matcher: Option<Arc<dyn CommentMatcher>>,

    // Reusable buffers
    current_column: String,
    current_row: String,
    line: Vec<char>,
}

impl<S: LineSource> Tokenizer<S> {
    /// Create a tokenizer over `source` using the given preferences
    pub fn new(source: S, preferences: &CsvPreference) -> Self {
        Self {
            source,
            quote_char: preferences.quote_char(),
            escape_char: preferences.escape_char(),
            delimiter_char: preferences.delimiter_char(),
            surrounding_spaces_need_quotes: preferences.surrounding_spaces_need_quotes(),
            comment_matcher: preferences.comment_matcher().cloned(),
            current_column: String::with_capacity(256),
            current_row: String::with_capacity(1024),
            line: Vec::with_capacity(1024),
        }
    }

    /// Read the next logical row into `columns`
    ///
    /// `columns` is cleared first. Empty unquoted columns come out as `None`;
    /// a quoted empty column (`""`) also comes out as `None` because the
    /// quotes themselves are never stored. Empty lines and comment lines are
    /// skipped. Returns `Ok(false)` once the source is exhausted.
    pub fn read_columns(&mut self, columns: &mut Vec<Column>) -> Result<bool, TokenizeError> {
        columns.clear();
        self.current_column.clear();
        self.current_row.clear();

        // keep reading lines until data is found
        let line = loop {
            match self.source.next_physical_line()? {
                None => return Ok(false), // EOF
                Some(line) if line.is_empty() => continue,
                Some(line) if self.is_comment(&line) => {
                    debug!(line = self.source.line_number(), "skipping comment line");
                    continue;
                }
                Some(line) => break line,
            }
        };

        self.current_row.push_str(&line);
        self.load_line(&line);

        let mut state = RowState::new();
        loop {
            // None marks the end of the physical line
            let c = self.line.get(state.char_index).copied();
            match state.mode {
                TokenizerMode::Normal => {
                    if self.process_normal(c, &mut state, columns) {
                        trace!(
                            line = self.source.line_number(),
                            columns = columns.len(),
                            "row complete"
                        );
                        return Ok(true);
                    }
                }
                TokenizerMode::InQuotes => self.process_quoted(c, &mut state)?,
                TokenizerMode::AfterEscape => self.process_escape(c, &mut state)?,
            }
        }
    }

    /// Exact source text of the last row, physical lines joined with `\n`
    pub fn raw_row_text(&self) -> &str {
        &self.current_row
    }

    /// Number of the last physical line read from the source
    pub fn current_line_number(&self) -> usize {
        self.source.line_number()
    }

    /// Borrow the underlying line source
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Consume the tokenizer, returning the line source
    pub fn into_inner(self) -> S {
        self.source
    }

    fn is_comment(&self, line: &str) -> bool {
        self.comment_matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_comment(line))
    }

    fn load_line(&mut self, line: &str) {
        self.line.clear();
        self.line.extend(line.chars());
    }

    /// Handles one character outside quotes; returns `true` when the row is complete
    fn process_normal(
        &mut self,
        c: Option<char>,
        state: &mut RowState,
        columns: &mut Vec<Column>,
    ) -> bool {
        state.char_index += 1;
        match c {
            Some(c) if c == self.delimiter_char => {
                if !self.surrounding_spaces_need_quotes {
                    push_spaces(&mut self.current_column, state.pending_spaces);
                }
                self.commit_column(columns);
                state.pending_spaces = 0;
                false
            }
            Some(SPACE) => {
                state.pending_spaces += 1;
                false
            }
            None => {
                if !self.surrounding_spaces_need_quotes {
                    push_spaces(&mut self.current_column, state.pending_spaces);
                }
                self.commit_column(columns);
                true
            }
            Some(c) if c == self.quote_char => {
                state.mode = TokenizerMode::InQuotes;
                state.quote_scope_start_line = Some(self.source.line_number());

                // spaces before an opening quote are data unless they're trimmed
                self.flush_leading_spaces(state);
                false
            }
            Some(c) => {
                self.flush_leading_spaces(state);
                self.current_column.push(c);
                false
            }
        }
    }

    fn process_quoted(&mut self, c: Option<char>, state: &mut RowState) -> Result<(), CsvError> {
        match c {
            None => {
                // a line break inside quotes is data; the exact terminator is lost
                self.current_column.push(NEWLINE);
                self.current_row.push(NEWLINE);

                let start_line = state
                    .quote_scope_start_line
                    .unwrap_or_else(|| self.source.line_number());
                let line = self.source.next_physical_line()?.ok_or_else(|| {
                    CsvError::UnterminatedQuotedField {
                        start_line,
                        end_line: self.source.line_number(),
                    }
                })?;
                trace!(
                    start_line,
                    line = self.source.line_number(),
                    "quoted column continues"
                );

                self.current_row.push_str(&line);
                self.load_line(&line);
                state.char_index = 0;
            }
            Some(c) if c == self.quote_char => {
                if self.line.get(state.char_index + 1) == Some(&self.quote_char) {
                    // escaped quote ("")
                    self.current_column.push(c);
                    state.char_index += 2;
                } else {
                    state.mode = TokenizerMode::Normal;
                    state.quote_scope_start_line = None;
                    state.char_index += 1;
                }
            }
            Some(c) if c == self.escape_char => {
                state.mode = TokenizerMode::AfterEscape;
                state.char_index += 1;
            }
            Some(c) => {
                // delimiters and spaces carry no meaning inside quotes
                self.current_column.push(c);
                state.char_index += 1;
            }
        }
        Ok(())
    }

    fn process_escape(&mut self, c: Option<char>, state: &mut RowState) -> Result<(), CsvError> {
        state.mode = TokenizerMode::InQuotes;

        let c = match c {
            Some(c) => c,
            None if self.escape_char == BACKSLASH => {
                // escaped line break: leave the end of line for quote mode to continue the column
                return Ok(());
            }
            None => return Err(self.malformed_escape(NEWLINE, state)),
        };
        state.char_index += 1;

        if c == self.escape_char || c == self.quote_char {
            self.current_column.push(c);
        } else if self.escape_char == BACKSLASH {
            match c {
                't' => self.current_column.push('\t'),
                'b' => self.current_column.push('\u{0008}'),
                'n' => self.current_column.push('\n'),
                'r' => self.current_column.push('\r'),
                '\'' | '"' | '\\' => self.current_column.push(c),
                // anything else after a backslash is dropped
                _ => {}
            }
        } else {
            return Err(self.malformed_escape(c, state));
        }
        Ok(())
    }

    fn malformed_escape(&self, found: char, state: &RowState) -> CsvError {
        let end_line = self.source.line_number();
        CsvError::MalformedEscapeSequence {
            found,
            escape_char: self.escape_char,
            start_line: state.quote_scope_start_line.unwrap_or(end_line),
            end_line,
        }
    }

    /// Commit pending spaces unless they are leading spaces that get trimmed
    fn flush_leading_spaces(&mut self, state: &mut RowState) {
        if !self.surrounding_spaces_need_quotes || !self.current_column.is_empty() {
            push_spaces(&mut self.current_column, state.pending_spaces);
        }
        state.pending_spaces = 0;
    }

    fn commit_column(&mut self, columns: &mut Vec<Column>) {
        if self.current_column.is_empty() {
            columns.push(None);
        } else {
            columns.push(Some(self.current_column.clone()));
        }
        self.current_column.clear();
    }
}

fn push_spaces(buffer: &mut String, spaces: usize) {
    buffer.extend(std::iter::repeat(SPACE).take(spaces));
}
