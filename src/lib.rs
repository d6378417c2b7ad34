//! swiftstrip - Comment remover for Swift source code
//!
//! Strips `//`, `/* */` and extended-regex `#` comments from Swift sources
//! while leaving every other byte unchanged, including comment-looking
//! sequences inside strings, raw strings, regex literals and nested string
//! interpolations.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod process;
pub mod scanner;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::Result;
pub use scanner::{strip_comments, ScanOptions, Scanner};
