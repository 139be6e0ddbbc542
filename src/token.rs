use std::borrow::Cow;
use std::fmt;

/// 1-based line and column of a byte offset in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Locate `offset` inside `source`. Columns count scalar values,
    /// not bytes. Offsets past the end clamp to the end of input.
    #[must_use]
    pub fn locate(source: &str, offset: usize) -> Self {
        let mut end = offset.min(source.len());
        while !source.is_char_boundary(end) {
            end -= 1;
        }
        let before = &source[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Character or literal that cannot appear where it was found.
    Illegal,
    /// End of input. Returned again on every later call.
    EndOfInput,
    /// Comment (`# ...`), `#` included.
    Comment,
    /// Assignment operator `=`.
    Assign,
    /// Variable name at the start of a line.
    Identifier,
    /// Double-quoted or unquoted value; quoted escapes are resolved.
    Value,
    /// Single-quoted value, used as-is.
    RawValue,
    /// Any whitespace character except `\n`.
    Space,
    /// One or more consecutive `\n`.
    NewLine,
}

impl TokenKind {
    /// Display name, also used as the literal of `EndOfInput`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::EndOfInput => "EOF",
            Self::Comment => "COMMENT",
            Self::Assign => "=",
            Self::Identifier => "IDENTIFIER",
            Self::Value => "VALUE",
            Self::RawValue => "RAW_VALUE",
            Self::Space => "SPACE",
            Self::NewLine => "NEW_LINE",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token.
///
/// `offset` and `length` describe the source bytes the literal was taken
/// from. For quoted values that excludes the quotes, and for a resolved
/// escape the literal may be shorter than `length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub literal: Cow<'a, str>,
    pub offset: usize,
    pub length: usize,
}

impl<'a> Token<'a> {
    pub(crate) fn new(
        kind: TokenKind,
        literal: impl Into<Cow<'a, str>>,
        end: usize,
        length: usize,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            offset: end - length,
            length,
        }
    }

    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        matches!(self.kind, TokenKind::NewLine | TokenKind::EndOfInput)
    }
}
