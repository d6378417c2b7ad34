//! The comment-stripping scanner.
//!
//! [`Scanner`] walks the input one character at a time and dispatches on the
//! active [`ParseState`]. Characters inside comments are dropped (line
//! breaks excepted, so line numbering survives); everything else is copied
//! to the output unchanged. String literals, raw strings, regex literals
//! and string interpolations are tracked so that comment-looking sequences
//! inside them are never mistaken for comments, at any nesting depth.
//!
//! The scanner performs no validation: unterminated constructs at end of
//! input simply yield whatever was accumulated so far, and the result for
//! non-Swift input is mechanical but well-defined. No state survives
//! between calls to [`Scanner::strip`].

use super::lookback::TokenTrace;
use super::state::{ParseState, ScanOptions, StateContext};

/// Single-pass comment remover for Swift source text.
///
/// Reusable: [`strip`](Scanner::strip) resets all scan state, so one
/// `Scanner` can process many files. Independent scanners are safe to run
/// concurrently; nothing is shared.
pub struct Scanner {
    options: ScanOptions,

    chars: Vec<char>,
    i: usize,
    out: String,

    state: ParseState,
    stack: Vec<StateContext>,

    /// `/* */` nesting depth while in `BlockComment`.
    comment_depth: usize,
    /// `#` count of the active raw string or extended regex delimiter.
    hash_count: usize,
    /// Quote count of the active string delimiter (1 or 3+).
    quote_count: usize,

    // Balanced-pair depths while in `InInterpolation`. The interpolation
    // closes on the `)` that returns all three to zero.
    paren_depth: isize,
    brace_depth: isize,
    bracket_depth: isize,

    /// The active comment is copied to the output instead of dropped.
    preserve_comment: bool,
    /// A non-comment, non-whitespace character has been emitted.
    seen_code: bool,
    trace: TokenTrace,
}

impl Scanner {
    #[must_use]
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            chars: Vec::new(),
            i: 0,
            out: String::new(),
            state: ParseState::Normal,
            stack: Vec::new(),
            comment_depth: 0,
            hash_count: 0,
            quote_count: 0,
            paren_depth: 0,
            brace_depth: 0,
            bracket_depth: 0,
            preserve_comment: false,
            seen_code: false,
            trace: TokenTrace::new(),
        }
    }

    /// Remove comments from `source`, leaving all other content unchanged.
    ///
    /// Total over all inputs: malformed or truncated source yields the
    /// best-effort output accumulated up to end of input.
    pub fn strip(&mut self, source: &str) -> String {
        self.chars = source.chars().collect();
        self.i = 0;
        self.out = String::with_capacity(source.len());
        self.state = ParseState::Normal;
        self.stack.clear();
        self.comment_depth = 0;
        self.hash_count = 0;
        self.quote_count = 0;
        self.paren_depth = 0;
        self.brace_depth = 0;
        self.bracket_depth = 0;
        self.preserve_comment = false;
        self.seen_code = false;
        self.trace.reset();

        while self.i < self.chars.len() {
            self.step();
            self.i += 1;
        }

        self.chars = Vec::new();
        std::mem::take(&mut self.out)
    }

    fn step(&mut self) {
        match self.state {
            ParseState::Normal | ParseState::InInterpolation => {
                self.handle_normal_or_interpolation();
            }
            ParseState::LineComment => self.handle_line_comment(),
            ParseState::BlockComment => self.handle_block_comment(),
            ParseState::InString => self.handle_string(ParseState::StringEscape),
            ParseState::InMultilineString => {
                self.handle_string(ParseState::MultilineStringEscape);
            }
            ParseState::StringEscape => self.handle_escape(ParseState::InString),
            ParseState::MultilineStringEscape => {
                self.handle_escape(ParseState::InMultilineString);
            }
            ParseState::RegexLiteral => self.handle_regex(),
            ParseState::ExtendedRegex => self.handle_extended_regex(),
        }
    }

    fn current(&self) -> char {
        self.chars[self.i]
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.i + offset).copied()
    }

    /// Count consecutive occurrences of `c` starting at `offset` from the cursor.
    fn run_length(&self, c: char, offset: usize) -> usize {
        let mut count = 0;
        while self.peek(offset + count) == Some(c) {
            count += 1;
        }
        count
    }

    /// Append one code-level character, keeping the lookback trace current.
    fn emit(&mut self, c: char) {
        self.out.push(c);
        self.trace.record(c);
        if !c.is_whitespace() {
            self.seen_code = true;
        }
    }

    /// Resume the context that was active before a temporary state
    /// (string, regex, comment) ends. While any interpolation is open the
    /// paren depth is at least one, so the check is unambiguous.
    fn revert_to_enclosing(&mut self) {
        self.hash_count = 0;
        self.quote_count = 0;
        self.state = if self.paren_depth > 0 {
            ParseState::InInterpolation
        } else {
            ParseState::Normal
        };
    }

    fn restore(&mut self, ctx: StateContext) {
        self.state = ctx.state;
        self.hash_count = ctx.hash_count;
        self.quote_count = ctx.quote_count;
        self.paren_depth = ctx.paren_depth;
        self.brace_depth = ctx.brace_depth;
        self.bracket_depth = ctx.bracket_depth;
    }

    /// Whether the comment opening at the cursor survives the scan.
    fn comment_preserved(&self, doc: bool) -> bool {
        (self.options.keep_doc_comments && doc)
            || (self.options.keep_header && !self.seen_code)
    }

    fn handle_normal_or_interpolation(&mut self) {
        let c = self.current();
        let next = self.peek(1);

        if c == '/' && next == Some('/') {
            // `///` is a doc comment
            let doc = self.peek(2) == Some('/');
            self.preserve_comment = self.comment_preserved(doc);
            self.state = ParseState::LineComment;
            self.i += 1;
            if self.preserve_comment {
                self.out.push_str("//");
            }
            return;
        }
        if c == '/' && next == Some('*') {
            // `/**` is a doc comment, `/**/` is an empty plain comment
            let doc = self.peek(2) == Some('*') && self.peek(3) != Some('/');
            self.preserve_comment = self.comment_preserved(doc);
            self.state = ParseState::BlockComment;
            self.comment_depth = 1;
            self.i += 1;
            if self.preserve_comment {
                self.out.push_str("/*");
            }
            return;
        }

        if c == '#' {
            let hashes = self.run_length('#', 0);
            match self.peek(hashes) {
                Some('"') => {
                    let quotes = self.run_length('"', hashes);
                    self.enter_string(hashes, quotes);
                    return;
                }
                Some('/') => {
                    // The `#` prefix is unambiguous: always an extended regex.
                    self.state = ParseState::ExtendedRegex;
                    self.hash_count = hashes;
                    for _ in 0..hashes {
                        self.emit('#');
                    }
                    self.emit('/');
                    self.i += hashes;
                    return;
                }
                _ => {}
            }
        }

        if c == '"' {
            let quotes = self.run_length('"', 0);
            self.enter_string(0, quotes);
            return;
        }

        if c == '/' && self.trace.regex_position() {
            self.state = ParseState::RegexLiteral;
            self.emit('/');
            return;
        }

        self.emit(c);

        if self.state == ParseState::InInterpolation {
            match c {
                '(' => self.paren_depth += 1,
                '{' => self.brace_depth += 1,
                '[' => self.bracket_depth += 1,
                ')' => self.paren_depth -= 1,
                '}' => self.brace_depth -= 1,
                ']' => self.bracket_depth -= 1,
                _ => {}
            }
            if self.paren_depth == 0 && self.brace_depth == 0 && self.bracket_depth == 0 {
                if let Some(ctx) = self.stack.pop() {
                    self.restore(ctx);
                } else {
                    // Unbalanced input; keep scanning as plain code.
                    self.state = ParseState::Normal;
                }
            }
        }
    }

    /// Open a string literal whose delimiter is `hashes` `#` characters
    /// followed by `quotes` consecutive quotes.
    fn enter_string(&mut self, hashes: usize, quotes: usize) {
        self.state = if quotes >= 3 {
            ParseState::InMultilineString
        } else {
            ParseState::InString
        };
        self.hash_count = hashes;
        self.quote_count = if quotes >= 3 { quotes } else { 1 };
        for _ in 0..hashes {
            self.emit('#');
        }
        for _ in 0..self.quote_count {
            self.emit('"');
        }
        self.i += hashes + self.quote_count - 1;
    }

    fn handle_line_comment(&mut self) {
        let c = self.current();
        if c == '\n' {
            // The line break survives so line numbering is unaffected.
            self.preserve_comment = false;
            self.revert_to_enclosing();
            self.emit('\n');
        } else if self.preserve_comment {
            self.out.push(c);
        }
    }

    fn handle_block_comment(&mut self) {
        let c = self.current();
        let next = self.peek(1);
        if c == '/' && next == Some('*') {
            self.comment_depth += 1;
            self.i += 1;
            if self.preserve_comment {
                self.out.push_str("/*");
            }
        } else if c == '*' && next == Some('/') {
            self.comment_depth -= 1;
            self.i += 1;
            if self.preserve_comment {
                self.out.push_str("*/");
            }
            if self.comment_depth == 0 {
                self.preserve_comment = false;
                self.revert_to_enclosing();
            }
        } else if c == '\n' {
            // Interior line breaks are kept so line counts survive.
            self.out.push('\n');
            self.trace.record('\n');
        } else if self.preserve_comment {
            self.out.push(c);
        }
    }

    /// Shared handler for single-line and multiline strings.
    ///
    /// Raw strings (`hash_count > 0`) are opaque: no escapes and no
    /// interpolation are recognized, only the matching closer.
    fn handle_string(&mut self, escape_state: ParseState) {
        let c = self.current();

        if self.hash_count == 0 && c == '\\' {
            if self.peek(1) == Some('(') {
                self.out.push_str("\\(");
                self.i += 1;
                self.stack.push(StateContext {
                    state: self.state,
                    hash_count: self.hash_count,
                    quote_count: self.quote_count,
                    paren_depth: self.paren_depth,
                    brace_depth: self.brace_depth,
                    bracket_depth: self.bracket_depth,
                });
                self.state = ParseState::InInterpolation;
                self.hash_count = 0;
                self.quote_count = 0;
                self.paren_depth = 1;
                self.brace_depth = 0;
                self.bracket_depth = 0;
            } else {
                self.state = escape_state;
                self.out.push('\\');
            }
            return;
        }

        if c == '"' {
            let quotes = self.run_length('"', 0);
            let closes = quotes >= self.quote_count
                && (self.hash_count == 0 || self.run_length('#', quotes) >= self.hash_count);
            if closes {
                for _ in 0..self.quote_count {
                    self.emit('"');
                }
                for _ in 0..self.hash_count {
                    self.emit('#');
                }
                self.i += self.quote_count + self.hash_count - 1;
                self.revert_to_enclosing();
                return;
            }
        }

        self.out.push(c);
    }

    /// Copy the escaped character unconditionally, so `\"` cannot close
    /// the string.
    fn handle_escape(&mut self, return_state: ParseState) {
        self.out.push(self.current());
        self.state = return_state;
    }

    fn handle_regex(&mut self) {
        let c = self.current();
        if c == '\\' {
            if let Some(next) = self.peek(1) {
                self.out.push('\\');
                self.out.push(next);
                self.i += 1;
            } else {
                self.out.push('\\');
            }
        } else if c == '/' {
            self.emit('/');
            self.revert_to_enclosing();
        } else if c == '\n' {
            // Regex literals are single-line; treat as unterminated.
            self.revert_to_enclosing();
            self.emit('\n');
        } else {
            self.out.push(c);
        }
    }

    fn handle_extended_regex(&mut self) {
        let c = self.current();

        if c == '/' && self.run_length('#', 1) >= self.hash_count {
            self.emit('/');
            for _ in 0..self.hash_count {
                self.emit('#');
            }
            self.i += self.hash_count;
            self.revert_to_enclosing();
            return;
        }

        if c == '#' {
            // A `#` comment runs to end of line. Trailing whitespace already
            // written on this output line goes with it; the line break is
            // left for the main loop.
            self.trim_line_trailing_whitespace();
            while self.i + 1 < self.chars.len() && self.chars[self.i + 1] != '\n' {
                self.i += 1;
            }
            return;
        }

        if c == '\\' {
            if let Some(next) = self.peek(1) {
                self.out.push('\\');
                self.out.push(next);
                self.i += 1;
                return;
            }
        }

        self.out.push(c);
    }

    /// Pop spaces and tabs written since the last line break.
    fn trim_line_trailing_whitespace(&mut self) {
        while matches!(self.out.chars().last(), Some(' ' | '\t')) {
            self.out.pop();
        }
    }
}

/// Remove all comments from `source` with default options.
///
/// Convenience wrapper over [`Scanner`]; equivalent to
/// `Scanner::new(ScanOptions::default()).strip(source)`.
#[must_use]
pub fn strip_comments(source: &str) -> String {
    Scanner::new(ScanOptions::default()).strip(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(source: &str) -> String {
        strip_comments(source)
    }

    #[test]
    fn test_line_comment_removed() {
        assert_eq!(strip("let x = 1 // note\n"), "let x = 1 \n");
    }

    #[test]
    fn test_line_comment_without_trailing_newline() {
        assert_eq!(strip("let x = 1 // note"), "let x = 1 ");
    }

    #[test]
    fn test_block_comment_removed() {
        assert_eq!(strip("let x = /* note */ 1"), "let x =  1");
    }

    #[test]
    fn test_nested_block_comment() {
        assert_eq!(strip("/* a /* b */ c */"), "");
    }

    #[test]
    fn test_deeply_nested_block_comment() {
        let mut source = String::new();
        for _ in 0..16 {
            source.push_str("/* x ");
        }
        for _ in 0..16 {
            source.push_str(" */");
        }
        assert_eq!(strip(&source), "");
    }

    #[test]
    fn test_block_comment_keeps_interior_line_breaks() {
        assert_eq!(strip("a /* one\ntwo\nthree */ b"), "a \n\n b");
    }

    #[test]
    fn test_comment_inside_string_preserved() {
        let source = "let s = \"not // a comment\"";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_block_marker_inside_string_preserved() {
        let source = "let s = \"/* kept */\"";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let source = "let s = \"a\\\"b // still string\"";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_multiline_string_preserved() {
        let source = "let s = \"\"\"\nline // kept\n/* kept */\n\"\"\"";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_interpolation_comment_stripped() {
        assert_eq!(
            strip("\"X \\(f() /* c */ + 1) Y\""),
            "\"X \\(f()  + 1) Y\""
        );
    }

    #[test]
    fn test_line_comment_inside_interpolation() {
        // a // inside an interpolation is a comment; the line break ends it
        assert_eq!(strip("\"\\(a // c\n+ b)\""), "\"\\(a \n+ b)\"");
    }

    #[test]
    fn test_nested_interpolation() {
        let source = "let s = \"outer \\(a + \"inner \\(x /* c */ + y)\") end\"";
        let expected = "let s = \"outer \\(a + \"inner \\(x  + y)\") end\"";
        assert_eq!(strip(source), expected);
    }

    #[test]
    fn test_comment_after_nested_interpolation_closes() {
        // After the inner string closes, the scanner is still inside the
        // outer interpolation: comments are stripped, string content is not.
        assert_eq!(
            strip("\"\\(\"a\\(b)\" /* c */) // kept\""),
            "\"\\(\"a\\(b)\" ) // kept\""
        );
    }

    #[test]
    fn test_parens_inside_nested_string_do_not_close_interpolation() {
        let source = "let s = \"\\(f(\"(\"))\" // tail";
        assert_eq!(strip(source), "let s = \"\\(f(\"(\"))\" ");
    }

    #[test]
    fn test_closure_brace_inside_interpolation() {
        let source = "\"values: \\(array.map { \"item: \\($0)\" /* c */ }.joined())\"";
        let expected = "\"values: \\(array.map { \"item: \\($0)\"  }.joined())\"";
        assert_eq!(strip(source), expected);
    }

    #[test]
    fn test_raw_string_is_opaque() {
        let source = "let r = #\"raw // not /* a */ comment\"#";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_raw_string_backslash_paren_is_literal() {
        let source = "let r = #\"no \\(interp) here\"# // gone";
        assert_eq!(strip(source), "let r = #\"no \\(interp) here\"# ");
    }

    #[test]
    fn test_raw_string_hash_count_exact() {
        let source = "##\"a\"#b\"##";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_double_hash_raw_string() {
        let source = "let r = ##\"inside /* not */ comment\"##";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_raw_multiline_string() {
        let source = "let r = #\"\"\"\n// kept\n\"\"\"#";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_division_preserved() {
        assert_eq!(strip("let d = 10 / 5 // half\n"), "let d = 10 / 5 \n");
    }

    #[test]
    fn test_division_after_subscript() {
        assert_eq!(
            strip("let v = dictionary[\"key\"] / 2 // divide\n"),
            "let v = dictionary[\"key\"] / 2 \n"
        );
    }

    #[test]
    fn test_regex_literal_content_preserved() {
        let source = "let re = /\\d+\\/\\/x/ // tail\n";
        assert_eq!(strip(source), "let re = /\\d+\\/\\/x/ \n");
    }

    #[test]
    fn test_regex_literal_after_return() {
        let source = "return /[a-z]+/";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_regex_literal_ends_at_line_break() {
        // Misclassified or unterminated regexes must not swallow the file.
        assert_eq!(strip("let re = /abc\nlet x = 1 // c\n"), "let re = /abc\nlet x = 1 \n");
    }

    #[test]
    fn test_extended_regex_comment_stripped() {
        let source = "let re = #/\n  \\d+     # digits\n  \\s+  # spaces\n/#";
        let expected = "let re = #/\n  \\d+\n  \\s+\n/#";
        assert_eq!(strip(source), expected);
    }

    #[test]
    fn test_extended_regex_escaped_hash() {
        let source = "let re = #/a\\#b/#";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_extended_regex_ignores_preceding_token() {
        // `#/` opens an extended regex even in operand position
        assert_eq!(strip("x #/a # c\n/# y"), "x #/a\n/# y");
    }

    #[test]
    fn test_extended_regex_slash_without_hash_is_content() {
        let source = "let re = ##/a/b/##";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_line_count_preserved() {
        let source = "// one\nlet a = 1 // two\n/* three */\nlet b = 2\n";
        let stripped = strip(source);
        assert_eq!(source.lines().count(), stripped.lines().count());
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(strip("let x = 1 /* never closed"), "let x = 1 ");
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(strip("let s = \"open // kept"), "let s = \"open // kept");
    }

    #[test]
    fn test_unterminated_interpolation() {
        assert_eq!(strip("let s = \"\\(a /* c */"), "let s = \"\\(a ");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip(""), "");
    }

    #[test]
    fn test_idempotent() {
        let source = "let a = 1 // c\nlet s = \"\\(x /* y */)\"\nlet re = /a\\/b/ // t\n";
        let once = strip(source);
        assert_eq!(strip(&once), once);
    }

    #[test]
    fn test_scanner_reusable_across_calls() {
        let mut scanner = Scanner::new(ScanOptions::default());
        assert_eq!(scanner.strip("a // x\n"), "a \n");
        assert_eq!(scanner.strip("\"\\(b /* y */)\""), "\"\\(b )\"");
    }

    #[test]
    fn test_keep_doc_line_comments() {
        let options = ScanOptions {
            keep_doc_comments: true,
            ..Default::default()
        };
        let source = "/// Doc line.\nlet x = 1 // plain\n";
        assert_eq!(
            Scanner::new(options).strip(source),
            "/// Doc line.\nlet x = 1 \n"
        );
    }

    #[test]
    fn test_keep_doc_block_comments() {
        let options = ScanOptions {
            keep_doc_comments: true,
            ..Default::default()
        };
        let source = "/** Doc /* nested */ block */\nlet x = 1 /* plain */\n";
        assert_eq!(
            Scanner::new(options).strip(source),
            "/** Doc /* nested */ block */\nlet x = 1 \n"
        );
    }

    #[test]
    fn test_empty_block_comment_is_not_doc() {
        let options = ScanOptions {
            keep_doc_comments: true,
            ..Default::default()
        };
        assert_eq!(Scanner::new(options).strip("/**/let x = 1"), "let x = 1");
    }

    #[test]
    fn test_keep_header() {
        let options = ScanOptions {
            keep_header: true,
            ..Default::default()
        };
        let source = "// Copyright 2024\n// MIT license\n\nimport Foo // gone\n";
        assert_eq!(
            Scanner::new(options).strip(source),
            "// Copyright 2024\n// MIT license\n\nimport Foo \n"
        );
    }

    #[test]
    fn test_keep_header_block_comment() {
        let options = ScanOptions {
            keep_header: true,
            ..Default::default()
        };
        let source = "/* Copyright\n   2024 */\nlet x = 1 /* gone */\n";
        assert_eq!(
            Scanner::new(options).strip(source),
            "/* Copyright\n   2024 */\nlet x = 1 \n"
        );
    }
}
