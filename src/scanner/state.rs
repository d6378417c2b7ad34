//! Scanner state definitions.
//!
//! The scanner is a finite-state machine: exactly one [`ParseState`] is
//! active at any cursor position, and entering a string interpolation pushes
//! a [`StateContext`] snapshot so the enclosing lexical context can be
//! resumed when the interpolation closes.

/// Lexical state of the scanner at the current cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Plain Swift code.
    Normal,
    /// Inside a `//` comment, up to (not including) the next line break.
    LineComment,
    /// Inside a `/* */` comment; nesting tracked by a depth counter.
    BlockComment,
    /// Inside a single-line `"` string.
    InString,
    /// Inside a `"""` multiline string.
    InMultilineString,
    /// The character after a `\` in a single-line string.
    StringEscape,
    /// The character after a `\` in a multiline string.
    MultilineStringEscape,
    /// Inside a `/ /` regex literal.
    RegexLiteral,
    /// Inside a `#/ /#` extended regex literal.
    ExtendedRegex,
    /// Inside a `\( )` string interpolation; scans like `Normal`.
    InInterpolation,
}

/// Snapshot of the lexical context saved when a `\(` interpolation opens.
///
/// Popping the snapshot is the only way the enclosing context is recovered.
/// The bracket depths belong to the *enclosing* interpolation (zero when the
/// string containing the `\(` sits directly in normal code); restoring them
/// keeps nested interpolations from corrupting the outer counters.
#[derive(Debug, Clone, Copy)]
pub struct StateContext {
    /// State to resume: `InString` or `InMultilineString`.
    pub state: ParseState,
    /// `#` count of the suspended string's delimiter.
    pub hash_count: usize,
    /// Quote count of the suspended string's delimiter (1 or 3+).
    pub quote_count: usize,
    /// Unmatched `(` count of the enclosing interpolation, if any.
    pub paren_depth: isize,
    /// Unmatched `{` count of the enclosing interpolation, if any.
    pub brace_depth: isize,
    /// Unmatched `[` count of the enclosing interpolation, if any.
    pub bracket_depth: isize,
}

/// Options controlling which comments survive a scan.
///
/// The default (everything off) strips every comment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Copy `///` and `/** */` documentation comments to the output
    /// instead of stripping them.
    pub keep_doc_comments: bool,
    /// Copy comments that appear before the first non-comment,
    /// non-whitespace character of the input (license headers).
    pub keep_header: bool,
}
