//! Byte-cursor lexer for chat commands.
//!
//! Whitespace (spaces and tabs) separates tokens but is never emitted. Once the
//! end of input is reached every further call to [`Lexer::scan_token`] returns
//! another zero-length EOF token.

use super::error::ParserError;
use super::token::{Token, TokenKind};

pub struct Lexer<'src> {
    input: &'src str,
    cursor: usize,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self {
            input,
            cursor: 0,
            finished: false,
        }
    }

    pub fn input(&self) -> &'src str {
        self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scan_token(&mut self) -> Result<Token<'src>, ParserError> {
        self.skip_whitespace();
        let start = self.cursor;

        let Some(c) = self.advance() else {
            return Ok(Token::eof(start));
        };

        let kind = match c {
            b'!' => TokenKind::Bang,
            b'|' => TokenKind::Separator,
            b'-' => {
                if self.peek() == Some(b'-') {
                    self.advance();
                    TokenKind::DoubleDash
                } else {
                    TokenKind::Dash
                }
            }
            b':' => self.colon_or_emote(),
            c if c.is_ascii_alphabetic() => {
                self.advance_while(|c| c.is_ascii_alphabetic());
                TokenKind::Identifier
            }
            c if c.is_ascii_digit() => {
                self.advance_while(|c| c.is_ascii_digit());
                TokenKind::Number
            }
            _ => {
                // Step over the whole character so the reported text stays valid UTF-8.
                self.cursor = start + self.char_len_at(start);
                return Err(ParserError::invalid_token(&self.token(TokenKind::Invalid, start)));
            }
        };

        Ok(self.token(kind, start))
    }

    /// Called right after an opening `:`. Looks ahead for `word:`; when the run
    /// is interrupted or input ends first the cursor goes back to just after the
    /// opening colon.
    fn colon_or_emote(&mut self) -> TokenKind {
        let rewind_to = self.cursor;

        while let Some(next) = self.peek() {
            match next {
                b':' => {
                    self.advance();
                    return TokenKind::Emote;
                }
                c if c.is_ascii_alphanumeric() || c == b'_' => {
                    self.advance();
                }
                _ => break,
            }
        }

        self.cursor = rewind_to;
        TokenKind::Colon
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'src> {
        Token {
            kind,
            text: &self.input[start..self.cursor],
            start,
            end: self.cursor,
        }
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(|c| c == b' ' || c == b'\t');
    }

    fn advance_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.cursor += 1;
        }
    }

    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.cursor += 1;
        Some(c)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.cursor).copied()
    }

    fn char_len_at(&self, at: usize) -> usize {
        self.input[at..].chars().next().map_or(1, char::len_utf8)
    }
}

/// Yields every token up to and including the first EOF (or the first error),
/// then stops.
impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.scan_token();
        if !matches!(&result, Ok(token) if !token.is(TokenKind::Eof)) {
            self.finished = true;
        }

        Some(result)
    }
}
