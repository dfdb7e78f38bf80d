//! Physical line sources feeding the tokenizer

use std::io::{self, BufRead, Cursor};

/// Supplies physical lines on demand
///
/// Lines are handed out without their terminator. `line_number` counts the
/// lines handed out so far, so it is the number of the most recent line.
pub trait LineSource {
    /// Next physical line, or `None` at end of stream
    fn next_physical_line(&mut self) -> io::Result<Option<String>>;

    /// Number of the last line returned (0 before the first read)
    fn line_number(&self) -> usize;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn next_physical_line(&mut self) -> io::Result<Option<String>> {
        (**self).next_physical_line()
    }

    fn line_number(&self) -> usize {
        (**self).line_number()
    }
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_physical_line(&mut self) -> io::Result<Option<String>> {
        (**self).next_physical_line()
    }

    fn line_number(&self) -> usize {
        (**self).line_number()
    }
}

/// Line source over any buffered reader, splitting on `\n` and `\r\n`
pub struct LineReader<R> {
    reader: R,
    line_buffer: String,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_buffer: String::with_capacity(1024),
            line_number: 0,
        }
    }

    /// Consume the source, returning the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl LineReader<Cursor<Vec<u8>>> {
    /// Line source over in-memory text
    ///
    /// ```
    /// use csvrow::csv::{LineReader, LineSource};
    ///
    /// let mut lines = LineReader::from_text("a,b\r\nc,d");
    /// assert_eq!(lines.next_physical_line().unwrap().as_deref(), Some("a,b"));
    /// assert_eq!(lines.next_physical_line().unwrap().as_deref(), Some("c,d"));
    /// assert_eq!(lines.next_physical_line().unwrap(), None);
    /// assert_eq!(lines.line_number(), 2);
    /// ```
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(Cursor::new(text.into().into_bytes()))
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_physical_line(&mut self) -> io::Result<Option<String>> {
        self.line_buffer.clear();
        let bytes_read = self.reader.read_line(&mut self.line_buffer)?;
        if bytes_read == 0 {
            return Ok(None); // EOF
        }

        // Remove trailing newline
        if self.line_buffer.ends_with('\n') {
            self.line_buffer.pop();
            if self.line_buffer.ends_with('\r') {
                self.line_buffer.pop();
            }
        }

        self.line_number += 1;
        Ok(Some(self.line_buffer.clone()))
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(mut source: impl LineSource) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_physical_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_mixed_terminators() {
        let lines = collect(LineReader::from_text("a\nb\r\nc"));
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_lines_kept() {
        let lines = collect(LineReader::from_text("a\n\nb\n"));
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_lone_carriage_return_is_data() {
        let lines = collect(LineReader::from_text("a\rb\n"));
        assert_eq!(lines, vec!["a\rb"]);
    }

    #[test]
    fn test_line_number_counts_lines() {
        let mut reader = LineReader::from_text("x\ny\n");
        assert_eq!(reader.line_number(), 0);
        reader.next_physical_line().unwrap();
        assert_eq!(reader.line_number(), 1);
        reader.next_physical_line().unwrap();
        reader.next_physical_line().unwrap();
        // EOF does not advance the counter
        assert_eq!(reader.line_number(), 2);
    }

    #[test]
    fn test_mut_ref_source() {
        let mut reader = LineReader::from_text("only");
        let lines = collect(&mut reader);
        assert_eq!(lines, vec!["only"]);
        assert_eq!(reader.line_number(), 1);
    }
}
