//! Scanner, parser, and syntax tree for `.env` files.
//!
//! A `.env` file is a list of `NAME=value` assignments and `#` comments,
//! one per line. Values may be unquoted, double-quoted (escapes such as
//! `\t` and `\n` are resolved), or single-quoted (used as-is).
//!
//! # Quick start
//!
//! ## Parse into a mapping
//!
//! ```
//! let vars = envtree::parse_str("HTTP_ADDR=:8080\nLOG_LEVEL='debug'\n").unwrap();
//! assert_eq!(vars.get("HTTP_ADDR"), Some(":8080"));
//! assert_eq!(vars.get("LOG_LEVEL"), Some("debug"));
//! ```
//!
//! ## Inspect the syntax tree
//!
//! ```
//! use envtree::{Assignment, Comment, Statement, parse};
//!
//! let file = parse("# settings\nDEBUG\n").unwrap();
//! assert_eq!(
//!     file.statements,
//!     vec![
//!         Statement::Comment(Comment::new("# settings")),
//!         Statement::Assignment(Assignment::naked("DEBUG")),
//!     ]
//! );
//! ```
//!
//! Any error aborts the whole parse:
//!
//! ```
//! let err = envtree::parse_str("  INDENTED=1").unwrap_err();
//! assert_eq!(err.category(), envtree::ErrorCategory::Lexical);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod parser;
pub mod reduce;
pub mod scanner;
pub mod token;

use std::io::Read;
use std::path::Path;

pub use ast::{Assignment, Comment, File, Statement};
pub use parser::{ParseError, ParseErrorKind, Parser, parse};
pub use reduce::{EnvMap, reduce};
pub use scanner::{EncodingError, EncodingErrorKind, Scanner, tokenize};
pub use token::{Position, Token, TokenKind};

/// Unified error type covering encoding, parsing, and I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not valid UTF-8 or has a stray byte order mark.
    #[error("{0}")]
    Encoding(#[from] EncodingError),
    /// A lexical or syntax error.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// Reading the input failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Broad classification of an `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Encoding,
    Lexical,
    Syntax,
    Io,
}

impl Error {
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Encoding(_) => ErrorCategory::Encoding,
            Self::Parse(err) if err.is_lexical() => ErrorCategory::Lexical,
            Self::Parse(_) => ErrorCategory::Syntax,
            Self::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Parse a source string and reduce it to a name/value mapping.
pub fn parse_str(input: &str) -> Result<EnvMap, Error> {
    Ok(reduce(&parse(input)?))
}

/// Parse UTF-8 bytes. A leading byte order mark is skipped.
pub fn parse_bytes(input: &[u8]) -> Result<EnvMap, Error> {
    let input = std::str::from_utf8(input).map_err(EncodingError::from)?;
    parse_str(input)
}

/// Read `reader` to the end, then parse its contents.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<EnvMap, Error> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_bytes(&buf)
}

/// Read and parse the file at `path`.
pub fn from_path(path: impl AsRef<Path>) -> Result<EnvMap, Error> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading env file");
    parse_bytes(&std::fs::read(path)?)
}
