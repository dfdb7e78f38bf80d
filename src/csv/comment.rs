//! Comment-line predicates used to skip lines before tokenizing

use crate::error::{CsvError, Result};
use regex::Regex;

/// Decides whether a raw physical line is a comment
///
/// Matching lines are dropped by the tokenizer before any parsing happens, so
/// they never surface as data or as empty rows.
pub trait CommentMatcher: Send + Sync {
    /// Returns `true` if the line should be skipped
    fn is_comment(&self, line: &str) -> bool;
}

impl<F> CommentMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_comment(&self, line: &str) -> bool {
        self(line)
    }
}

/// Treats lines beginning with a fixed prefix as comments
#[derive(Debug, Clone)]
pub struct CommentStartsWith {
    value: String,
}

impl CommentStartsWith {
    /// Create a matcher for the given prefix, e.g. `"#"`
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(CsvError::InvalidConfiguration(
                "comment prefix should not be empty".to_string(),
            ));
        }
        Ok(Self { value })
    }
}

impl CommentMatcher for CommentStartsWith {
    fn is_comment(&self, line: &str) -> bool {
        line.starts_with(&self.value)
    }
}

/// Treats lines fully matching a regular expression as comments
#[derive(Debug, Clone)]
pub struct CommentMatches {
    pattern: Regex,
}

impl CommentMatches {
    /// Compile the pattern; the whole line has to match, not a substring
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(CsvError::InvalidConfiguration(
                "comment regex should not be empty".to_string(),
            ));
        }
        let anchored = format!("^(?:{})$", pattern);
        let pattern = Regex::new(&anchored).map_err(|e| {
            CsvError::InvalidConfiguration(format!("invalid comment regex: {}", e))
        })?;
        Ok(Self { pattern })
    }
}

impl CommentMatcher for CommentMatches {
    fn is_comment(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with() {
        let matcher = CommentStartsWith::new("#").unwrap();
        assert!(matcher.is_comment("# a comment"));
        assert!(!matcher.is_comment(" # indented"));
        assert!(!matcher.is_comment("a,b"));
    }

    #[test]
    fn test_starts_with_empty_rejected() {
        assert!(matches!(
            CommentStartsWith::new(""),
            Err(CsvError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_matches_whole_line() {
        let matcher = CommentMatches::new(r"//.*").unwrap();
        assert!(matcher.is_comment("// comment"));
        // substring match is not enough
        assert!(!matcher.is_comment("a,b // trailing"));
    }

    #[test]
    fn test_matches_invalid_regex() {
        assert!(matches!(
            CommentMatches::new("(unclosed"),
            Err(CsvError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_closure_matcher() {
        let matcher = |line: &str| line.starts_with("--");
        assert!(matcher.is_comment("-- sql style"));
        assert!(!matcher.is_comment("-a"));
    }
}
