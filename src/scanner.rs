use std::borrow::Cow;
use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

use crate::token::{Token, TokenKind};

const BOM: char = '\u{FEFF}';

/// Classifies an encoding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingErrorKind {
    /// Input bytes are not valid UTF-8.
    InvalidUtf8,
    /// Byte order mark somewhere other than the start of input.
    MisplacedByteOrderMark,
}

impl fmt::Display for EncodingErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUtf8 => write!(f, "illegal UTF-8 encoding"),
            Self::MisplacedByteOrderMark => write!(f, "illegal byte order mark"),
        }
    }
}

/// Input is malformed as a whole. Scanning never starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte offset {offset}")]
pub struct EncodingError {
    pub kind: EncodingErrorKind,
    pub offset: usize,
}

impl From<std::str::Utf8Error> for EncodingError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self {
            kind: EncodingErrorKind::InvalidUtf8,
            offset: err.valid_up_to(),
        }
    }
}

/// Tokenize a source string, stopping before `EndOfInput`.
///
/// # Errors
///
/// Returns `EncodingError` if a byte order mark appears after the
/// start of the input.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, EncodingError> {
    Ok(Scanner::new(input)?.collect())
}

/// Converts a `.env` source into tokens, one at a time.
///
/// The scanner tracks the previously consumed character and uses it to
/// decide whether a plain character starts an identifier (after a
/// newline or at the start of input) or an unquoted value (after `=`).
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    /// Last consumed character, `None` at start of input.
    prev: Option<char>,
    /// Character under the cursor, `None` at end of input.
    ch: Option<char>,
    offset: usize,
    peek_offset: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `input`, skipping a leading byte order mark.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` if a byte order mark appears anywhere
    /// other than the very first position.
    pub fn new(input: &'a str) -> Result<Self, EncodingError> {
        let start = if input.starts_with(BOM) {
            BOM.len_utf8()
        } else {
            0
        };

        if let Some(pos) = input[start..].find(BOM) {
            return Err(EncodingError {
                kind: EncodingErrorKind::MisplacedByteOrderMark,
                offset: start + pos,
            });
        }

        let mut scanner = Self {
            input,
            prev: None,
            ch: None,
            offset: start,
            peek_offset: start,
        };
        scanner.load();
        Ok(scanner)
    }

    /// The full source this scanner reads from.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.input
    }

    /// Scan the next token. Keeps returning `EndOfInput` once the
    /// input is exhausted.
    pub fn next_token(&mut self) -> Token<'a> {
        let token = match self.ch {
            None => Token::new(
                TokenKind::EndOfInput,
                TokenKind::EndOfInput.name(),
                self.offset,
                0,
            ),
            Some('\n') => self.scan_newlines(),
            Some(' ' | '\t' | '\r' | '\u{0B}' | '\u{0C}') => self.scan_single(TokenKind::Space),
            Some('=') => self.scan_single(TokenKind::Assign),
            Some('#') => self.scan_comment(),
            Some('"') => self.scan_quoted('"', true),
            Some('\'') => self.scan_quoted('\'', false),
            Some(ch) => match self.prev {
                None | Some('\n') if is_identifier_char(ch) => self.scan_identifier(),
                Some('=') => self.scan_unquoted(),
                _ => self.scan_single(TokenKind::Illegal),
            },
        };

        trace!(
            kind = %token.kind,
            offset = token.offset,
            length = token.length,
            "scanned token"
        );
        token
    }

    fn load(&mut self) {
        self.ch = self.input[self.offset..].chars().next();
        self.peek_offset = self.offset + self.ch.map_or(0, char::len_utf8);
    }

    fn bump(&mut self) {
        if let Some(ch) = self.ch {
            self.prev = Some(ch);
            self.offset = self.peek_offset;
            self.load();
        }
    }

    const fn at_line_end(&self) -> bool {
        matches!(self.ch, None | Some('\n'))
    }

    fn make(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token::new(
            kind,
            &self.input[start..self.offset],
            self.offset,
            self.offset - start,
        )
    }

    fn scan_single(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.offset;
        self.bump();
        self.make(kind, start)
    }

    fn scan_newlines(&mut self) -> Token<'a> {
        let start = self.offset;
        while self.ch == Some('\n') {
            self.bump();
        }
        Token::new(TokenKind::NewLine, "\n", self.offset, self.offset - start)
    }

    fn scan_comment(&mut self) -> Token<'a> {
        let start = self.offset;
        while !self.at_line_end() {
            self.bump();
        }
        self.make(TokenKind::Comment, start)
    }

    fn scan_identifier(&mut self) -> Token<'a> {
        let start = self.offset;
        while self.ch.is_some_and(is_identifier_char) {
            self.bump();
        }
        self.make(TokenKind::Identifier, start)
    }

    fn scan_unquoted(&mut self) -> Token<'a> {
        let start = self.offset;
        while !self.at_line_end() {
            self.bump();
        }
        self.make(TokenKind::Value, start)
    }

    /// Scan a quoted literal. With `interpret` set, backslash escapes
    /// are resolved; an unknown escape makes the whole token illegal.
    /// A backslash directly before the closing quote does not escape
    /// it: the quote still ends the literal.
    fn scan_quoted(&mut self, quote: char, interpret: bool) -> Token<'a> {
        self.bump(); // opening quote
        let start = self.offset;
        let mut kind = if interpret {
            TokenKind::Value
        } else {
            TokenKind::RawValue
        };
        // Allocated only once an escape needs resolving.
        let mut resolved: Option<String> = None;

        loop {
            match self.ch {
                None | Some('\n') => {
                    kind = TokenKind::Illegal;
                    break;
                }
                Some(ch) if ch == quote => break,
                Some('\\') if interpret => {
                    let escape_start = self.offset;
                    self.bump();
                    match self.ch.and_then(resolve_escape) {
                        Some(target) => {
                            resolved
                                .get_or_insert_with(|| self.input[start..escape_start].to_owned())
                                .push(target);
                            self.bump();
                        }
                        None => {
                            if self.ch.is_some_and(|ch| ch != quote && ch != '\n') {
                                kind = TokenKind::Illegal;
                            }
                            if let Some(buf) = resolved.as_mut() {
                                buf.push('\\');
                            }
                        }
                    }
                }
                Some(ch) => {
                    if let Some(buf) = resolved.as_mut() {
                        buf.push(ch);
                    }
                    self.bump();
                }
            }
        }

        let end = self.offset;
        let raw = &self.input[start..end];
        let literal = match resolved {
            Some(text) if kind != TokenKind::Illegal => Cow::Owned(text),
            _ => Cow::Borrowed(raw),
        };

        if self.ch == Some(quote) {
            self.bump(); // closing quote
        }

        Token::new(kind, literal, end, end - start)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.next_token();
        (token.kind != TokenKind::EndOfInput).then_some(token)
    }
}

impl FusedIterator for Scanner<'_> {}

const fn resolve_escape(ch: char) -> Option<char> {
    match ch {
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        'f' => Some('\u{0C}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{0B}'),
        '\\' => Some('\\'),
        _ => None,
    }
}

/// Letters are Unicode `Alphabetic`, which also admits letter numbers
/// (`Ⅻ`) and combining marks such as U+0345.
fn is_identifier_char(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_ascii_digit() || matches!(ch, '_' | '.' | ',' | '-')
}
