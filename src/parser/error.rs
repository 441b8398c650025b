use std::{fmt::Display, ops::Range};

use thiserror::Error;

use super::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErrorKind {
    InvalidToken,
    InvalidSyntax,
    InvalidDate,
    UnknownCommand,
}

impl Display for ParserErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParserErrorKind::InvalidToken => "Invalid token",
            ParserErrorKind::InvalidSyntax => "Invalid syntax",
            ParserErrorKind::InvalidDate => "Invalid date",
            ParserErrorKind::UnknownCommand => "Unknown command",
        };

        f.write_str(name)
    }
}

/// A terminal parse failure. Its `Display` output is what gets sent back to the
/// chat, e.g. `Invalid syntax: Expected Number got Dash`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {details}")]
pub struct ParserError {
    pub kind: ParserErrorKind,
    pub token_kind: TokenKind,
    pub span: Range<usize>,
    pub details: String,
}

impl ParserError {
    pub fn new(kind: ParserErrorKind, token: &Token<'_>, details: impl Into<String>) -> Self {
        Self {
            kind,
            token_kind: token.kind,
            span: token.start..token.end,
            details: details.into(),
        }
    }

    pub fn invalid_token(token: &Token<'_>) -> Self {
        Self::new(ParserErrorKind::InvalidToken, token, token.text)
    }

    pub fn unexpected(expected: TokenKind, got: &Token<'_>) -> Self {
        Self::new(
            ParserErrorKind::InvalidSyntax,
            got,
            format!("Expected {} got {}", expected, got.kind),
        )
    }

    pub fn invalid_date(token: &Token<'_>, details: impl Into<String>) -> Self {
        Self::new(ParserErrorKind::InvalidDate, token, details)
    }

    pub fn unknown_command(token: &Token<'_>) -> Self {
        Self::new(
            ParserErrorKind::UnknownCommand,
            token,
            format!("!{}", token.text),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_prefixed_with_kind_name() {
        let token = Token {
            kind: TokenKind::Dash,
            text: "-",
            start: 3,
            end: 4,
        };
        let error = ParserError::unexpected(TokenKind::Number, &token);

        assert_eq!(error.to_string(), "Invalid syntax: Expected Number got Dash");
        assert_eq!(error.span, 3..4);
    }
}
