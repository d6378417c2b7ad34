//! Regex/division disambiguation.
//!
//! A `/` in normal code either opens a regex literal or is a division
//! operator. The decision depends on the token that precedes it: operators
//! and punctuation that start an expression (`=`, `(`, `,`, ...), a small
//! set of keywords, or a line with no code yet all mean "expression
//! position", so the `/` opens a regex. Instead of rescanning the input,
//! the scanner feeds every committed code character into a [`TokenTrace`],
//! which keeps just enough history to answer the question in O(1).

/// Characters that put a following `/` in expression (regex) position.
const REGEX_PRECEDING: &[char] = &[
    '=', '(', ',', '[', ':', '{', '!', '&', '|', '^', '+', '-', '*', '/', '%', '<', '>', '~', ';',
];

/// Keywords that put a following `/` in expression position.
const REGEX_KEYWORDS: &[&str] = &["return", "where", "case"];

/// Rolling record of the last significant token emitted at code level.
///
/// Only characters emitted while scanning normal code or interpolation
/// bodies are recorded; string contents and dropped comment characters
/// never reach the trace.
#[derive(Debug, Default)]
pub struct TokenTrace {
    /// Last non-whitespace character recorded.
    prev: Option<char>,
    /// Trailing identifier run ending at `prev` (empty if `prev` is
    /// punctuation or separated from the cursor by whitespace).
    word: String,
    /// Whitespace was seen since the last recorded character.
    word_break: bool,
    /// A non-whitespace character has been recorded on the current line.
    line_has_token: bool,
}

impl TokenTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all recorded history.
    pub fn reset(&mut self) {
        self.prev = None;
        self.word.clear();
        self.word_break = false;
        self.line_has_token = false;
    }

    /// Record one committed code character.
    pub fn record(&mut self, c: char) {
        if c == '\n' {
            self.line_has_token = false;
            self.word_break = true;
            return;
        }
        if c.is_whitespace() {
            self.word_break = true;
            return;
        }
        self.prev = Some(c);
        self.line_has_token = true;
        if c.is_alphanumeric() || c == '_' {
            if self.word_break {
                self.word.clear();
                self.word_break = false;
            }
            self.word.push(c);
        } else {
            self.word.clear();
            self.word_break = false;
        }
    }

    /// Would a `/` at the cursor open a regex literal?
    #[must_use]
    pub fn regex_position(&self) -> bool {
        // First non-whitespace token on the line.
        if !self.line_has_token {
            return true;
        }
        match self.prev {
            None => true,
            Some(c) if REGEX_PRECEDING.contains(&c) => true,
            Some(c) if c.is_alphanumeric() || c == '_' => {
                REGEX_KEYWORDS.contains(&self.word.as_str())
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace_of(text: &str) -> TokenTrace {
        let mut trace = TokenTrace::new();
        for c in text.chars() {
            trace.record(c);
        }
        trace
    }

    #[test]
    fn test_empty_input_is_regex_position() {
        assert!(TokenTrace::new().regex_position());
    }

    #[test]
    fn test_after_number_is_division() {
        assert!(!trace_of("10 ").regex_position());
    }

    #[test]
    fn test_after_identifier_is_division() {
        assert!(!trace_of("count ").regex_position());
    }

    #[test]
    fn test_after_closing_bracket_is_division() {
        assert!(!trace_of("dictionary[\"key\"] ").regex_position());
    }

    #[test]
    fn test_after_assignment_is_regex() {
        assert!(trace_of("let regex = ").regex_position());
    }

    #[test]
    fn test_after_open_paren_is_regex() {
        assert!(trace_of("match(").regex_position());
    }

    #[test]
    fn test_after_comma_is_regex() {
        assert!(trace_of("f(a, ").regex_position());
    }

    #[test]
    fn test_return_keyword_is_regex() {
        assert!(trace_of("return ").regex_position());
    }

    #[test]
    fn test_case_keyword_is_regex() {
        assert!(trace_of("case ").regex_position());
    }

    #[test]
    fn test_identifier_ending_in_keyword_is_division() {
        assert!(!trace_of("myreturn ").regex_position());
    }

    #[test]
    fn test_line_start_is_regex() {
        assert!(trace_of("let x = a\n").regex_position());
    }

    #[test]
    fn test_word_survives_whitespace_but_not_new_token() {
        // "return" followed by spaces is still the previous token
        assert!(trace_of("return   ").regex_position());
        // but a fresh identifier after it is not
        assert!(!trace_of("return value").regex_position());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut trace = trace_of("count");
        assert!(!trace.regex_position());
        trace.reset();
        assert!(trace.regex_position());
    }
}
