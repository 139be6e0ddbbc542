use std::fmt;

use tracing::debug;

use crate::ast::{Assignment, Comment, File, Statement};
use crate::scanner::{EncodingError, Scanner};
use crate::token::{Position, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The scanner produced an illegal token: an unterminated quote,
    /// an unknown escape, or a character out of place.
    Lexical { literal: String },
    /// A line starts with something other than a name or a comment.
    UnexpectedStatement { found: TokenKind, literal: String },
    /// A statement continues with a token the grammar does not allow.
    UnexpectedToken { found: TokenKind, literal: String },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical { literal } => {
                write!(f, "illegal token: {literal:?}")
            }
            Self::UnexpectedStatement { found, literal } => {
                write!(f, "unexpected statement: {found}({literal:?})")
            }
            Self::UnexpectedToken { found, literal } => {
                write!(f, "unexpected token: {found}({literal:?})")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", position.line, position.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset of the offending token.
    pub offset: usize,
    pub position: Position,
}

impl ParseError {
    /// Whether the offending token was rejected by the scanner rather
    /// than by the grammar.
    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Lexical { .. })
    }
}

/// Parse a source string into a `File` syntax tree.
///
/// # Errors
///
/// Returns `crate::Error::Encoding` for a misplaced byte order mark and
/// `crate::Error::Parse` for the first lexical or syntax error.
pub fn parse(input: &str) -> Result<File, crate::Error> {
    let scanner = Scanner::new(input)?;
    Ok(Parser::new(scanner).parse()?)
}

/// Recursive-descent parser over a `Scanner` with one token of
/// lookahead.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    token: Token<'a>,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(mut scanner: Scanner<'a>) -> Self {
        let token = scanner.next_token();
        Self { scanner, token }
    }

    /// Convenience constructor that builds the scanner too.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` for a misplaced byte order mark.
    pub fn from_source(input: &'a str) -> Result<Self, EncodingError> {
        Ok(Self::new(Scanner::new(input)?))
    }

    /// Parse the whole input. The first error aborts the parse.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for the first illegal token or token
    /// sequence outside the grammar.
    pub fn parse(mut self) -> Result<File, ParseError> {
        let mut statements = Vec::new();

        while self.token.kind != TokenKind::EndOfInput {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    debug!(error = %err, "parse failed");
                    return Err(err);
                }
            }
        }

        debug!(statements = statements.len(), "parsed file");
        Ok(File { statements })
    }

    /// Blank lines are skipped first, so input that ends in a blank run
    /// reaches `EndOfInput` here and is rejected.
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.skip_blank();
        match self.token.kind {
            TokenKind::Identifier => self.parse_assignment().map(Statement::Assignment),
            TokenKind::Comment => Ok(Statement::Comment(self.parse_comment())),
            _ => Err(self.error(|found, literal| ParseErrorKind::UnexpectedStatement {
                found,
                literal,
            })),
        }
    }

    fn parse_comment(&mut self) -> Comment {
        let text = self.take_literal();
        Comment { text }
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        let name = self.take_literal();

        if self.token.is_terminator() {
            self.advance();
            return Ok(Assignment::naked(name));
        }

        if self.token.kind != TokenKind::Assign {
            return Err(self.unexpected_token());
        }
        self.advance();

        match self.token.kind {
            TokenKind::NewLine | TokenKind::EndOfInput => {
                self.advance();
                Ok(Assignment::naked(name))
            }
            TokenKind::Value | TokenKind::RawValue => {
                let value = self.take_literal();
                if !self.token.is_terminator() {
                    return Err(self.unexpected_token());
                }
                self.advance();
                Ok(Assignment { name, value })
            }
            _ => Err(self.unexpected_token()),
        }
    }

    fn skip_blank(&mut self) {
        while matches!(self.token.kind, TokenKind::NewLine | TokenKind::Space) {
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.token = self.scanner.next_token();
    }

    /// Take the current literal and move to the next token.
    fn take_literal(&mut self) -> String {
        let next = self.scanner.next_token();
        std::mem::replace(&mut self.token, next)
            .literal
            .into_owned()
    }

    fn unexpected_token(&self) -> ParseError {
        self.error(|found, literal| ParseErrorKind::UnexpectedToken { found, literal })
    }

    /// Build an error for the current token. Illegal tokens always
    /// report as lexical errors.
    fn error(&self, kind: impl FnOnce(TokenKind, String) -> ParseErrorKind) -> ParseError {
        let literal = self.token.literal.to_string();
        let kind = if self.token.kind == TokenKind::Illegal {
            ParseErrorKind::Lexical { literal }
        } else {
            kind(self.token.kind, literal)
        };
        ParseError {
            kind,
            offset: self.token.offset,
            position: Position::locate(self.scanner.source(), self.token.offset),
        }
    }
}
