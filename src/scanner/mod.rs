//! Swift comment-removal scanner.
//!
//! This module is the core of swiftstrip:
//! - [`Scanner`]: single-pass state machine that drops comments and copies
//!   everything else byte-for-byte
//! - [`TokenTrace`]: rolling last-token record for regex/division
//!   disambiguation
//! - [`ScanOptions`]: which comments (doc comments, file headers) survive
//!
//! The scanner tracks plain, multiline and raw string literals, regex and
//! extended regex literals, and nested string interpolations, so comment
//! markers inside any of those are left untouched while real comments are
//! stripped even deep inside interpolated expressions.

pub mod lookback;
pub mod machine;
pub mod state;

pub use lookback::TokenTrace;
pub use machine::{strip_comments, Scanner};
pub use state::{ParseState, ScanOptions, StateContext};
