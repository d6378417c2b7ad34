//! File-level stripping pipeline.
//!
//! Collaborators (the CLI batch driver, tests) consume the scanner through
//! [`strip_file`]: read everything, run one scan, write the result. Each
//! call owns its own scanner, so independent files can be processed in
//! parallel by running one call per file.

use std::borrow::Cow;
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::scanner::Scanner;
use crate::Result;

/// Strip comments from a single source, reading all of `input` and writing
/// the cleaned text to `output`.
///
/// Input bytes are interpreted as UTF-8; invalid sequences are replaced
/// rather than rejected, so a stray binary file produces garbage output
/// instead of aborting a batch run. Encoding conversion proper is a caller
/// concern.
pub fn strip_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
) -> Result<()> {
    let mut buffer = Vec::new();
    input.read_to_end(&mut buffer)?;

    let source: Cow<str> = String::from_utf8_lossy(&buffer);
    let stripped = Scanner::new(config.scan_options()).strip(&source);
    output.write_all(stripped.as_bytes())?;

    Ok(())
}
