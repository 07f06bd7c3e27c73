use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::SearchError;

/// What the reader typed into the search box, with its two toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    #[serde(default)]
    pub case_sensitive: bool,
    /// Interpret `text` as a regular expression instead of a literal.
    #[serde(default)]
    pub regex: bool,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }

    /// An empty or whitespace-only query searches for nothing.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Compile the trimmed query.
    ///
    /// Returns `Ok(None)` for a blank query. Literal queries have every
    /// metacharacter escaped; regex queries that fail to compile yield
    /// [`SearchError::Pattern`].
    pub fn compile(&self) -> Result<Option<SearchPattern>, SearchError> {
        let term = self.text.trim();
        if term.is_empty() {
            return Ok(None);
        }

        let source = if self.regex {
            term.to_string()
        } else {
            regex::escape(term)
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(!self.case_sensitive)
            .build()
            .map_err(|e| SearchError::Pattern(pattern_error_message(&e)))?;

        Ok(Some(SearchPattern { regex }))
    }
}

fn pattern_error_message(err: &regex::Error) -> String {
    match err {
        regex::Error::Syntax(detail) => detail
            .lines()
            .rev()
            .find(|line| line.starts_with("error:"))
            .map(|line| line.trim_start_matches("error:").trim().to_string())
            .unwrap_or_else(|| detail.clone()),
        other => other.to_string(),
    }
}

/// A compiled search pattern.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    regex: Regex,
}

/// One non-empty match with both character and byte coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMatch {
    /// Character offset of the first matched character.
    pub start: usize,
    /// Character offset one past the last matched character.
    pub end: usize,
    pub byte_start: usize,
    pub byte_end: usize,
    pub text: String,
}

impl CharMatch {
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }
}

impl SearchPattern {
    /// Literal pattern for `text`, used verbatim (not trimmed).
    pub fn literal(text: &str, case_sensitive: bool) -> Result<Self, SearchError> {
        let regex = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| SearchError::Pattern(pattern_error_message(&e)))?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.find_all(text).next().is_some()
    }

    /// Leftmost, non-overlapping matches in order; empty matches are skipped.
    pub fn find_all<'t>(&'t self, text: &'t str) -> impl Iterator<Item = CharMatch> + 't {
        let mut last_byte = 0;
        let mut last_char = 0;
        self.regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(move |m| {
                let start = last_char + text[last_byte..m.start()].chars().count();
                let end = start + m.as_str().chars().count();
                last_byte = m.end();
                last_char = end;
                CharMatch {
                    start,
                    end,
                    byte_start: m.start(),
                    byte_end: m.end(),
                    text: m.as_str().to_string(),
                }
            })
    }
}
