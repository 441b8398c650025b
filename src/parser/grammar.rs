use chrono::{Local, NaiveDateTime};

use crate::command::{Command, CommandKind};
use crate::item::ItemKind;

use super::error::{ParserError, ParserErrorKind};
use super::lexer::Lexer;
use super::token::{Token, TokenKind};

const WORD_KINDS: [TokenKind; 3] = [TokenKind::Identifier, TokenKind::Emote, TokenKind::Number];

/// Parses the first `!keyword` invocation found in `input`, resolving omitted
/// date fields against the local clock.
///
/// Returns `Ok(None)` when the input holds no tokens at all.
pub fn parse_command(input: &str) -> Result<Option<Command>, ParserError> {
    parse_command_at(input, Local::now().naive_local())
}

/// Same as [`parse_command`] with an explicit "now" used for date defaults.
pub fn parse_command_at(input: &str, now: NaiveDateTime) -> Result<Option<Command>, ParserError> {
    Parser::new(input, now).parse()
}

pub(super) struct Parser<'src> {
    lexer: Lexer<'src>,
    pub(super) current: Token<'src>,
    previous: Token<'src>,
    lookahead: Option<Token<'src>>,
    pub(super) now: NaiveDateTime,
}

impl<'src> Parser<'src> {
    pub(super) fn new(input: &'src str, now: NaiveDateTime) -> Self {
        Self {
            lexer: Lexer::new(input),
            current: Token::eof(0),
            previous: Token::eof(0),
            lookahead: None,
            now,
        }
    }

    fn parse(mut self) -> Result<Option<Command>, ParserError> {
        if self.consume()?.is(TokenKind::Eof) {
            return Ok(None);
        }

        self.expect(TokenKind::Bang)?;
        let keyword = self.expect_next(TokenKind::Identifier)?;
        let kind = CommandKind::from_keyword(keyword.text)
            .ok_or_else(|| ParserError::unknown_command(&keyword))?;

        let command = match kind {
            CommandKind::BriefMe => Command::BriefMe,
            CommandKind::RemindMe => self.parse_remind_me()?,
            CommandKind::StaffMe => self.parse_staff_me()?,
            CommandKind::RemoveMe => self.parse_remove_me()?,
            CommandKind::HelpMe => Command::HelpMe,
        };

        Ok(Some(command))
    }

    fn parse_remind_me(&mut self) -> Result<Command, ParserError> {
        let (identifier, _) = self.parse_free_text(&[TokenKind::Separator])?;
        let due_time = self.parse_due_time()?;

        Ok(Command::RemindMe {
            identifier,
            due_time,
        })
    }

    fn parse_staff_me(&mut self) -> Result<Command, ParserError> {
        let (identifier, terminator) =
            self.parse_free_text(&[TokenKind::Separator, TokenKind::Eof])?;

        let due_time = match terminator {
            TokenKind::Separator => Some(self.parse_due_time()?),
            _ => None,
        };

        Ok(Command::StaffMe {
            identifier,
            due_time,
        })
    }

    fn parse_remove_me(&mut self) -> Result<Command, ParserError> {
        let list_token = self.expect_next(TokenKind::Identifier)?;
        let list = match list_token.text {
            "reminder" => ItemKind::Reminder,
            "task" => ItemKind::Task,
            other => {
                return Err(ParserError::new(
                    ParserErrorKind::InvalidSyntax,
                    &list_token,
                    format!("Expected reminder or task got {other}"),
                ));
            }
        };

        self.expect_next(TokenKind::Separator)?;
        let (identifier, _) = self.parse_free_text(&[TokenKind::Eof])?;

        Ok(Command::RemoveMe { list, identifier })
    }

    /// Consumes a run of word tokens and the terminator that ends it. The name is
    /// the source slice spanning the run, so inner whitespace is kept as typed.
    fn parse_free_text(
        &mut self,
        terminators: &[TokenKind],
    ) -> Result<(String, TokenKind), ParserError> {
        let first = self.consume()?;
        if !first.is_word() {
            return Err(expected_one_of(&WORD_KINDS, &first));
        }

        loop {
            let next = self.consume()?;
            if next.is_word() {
                continue;
            }

            if terminators.contains(&next.kind) {
                let text = &self.lexer.input()[first.start..self.previous.end];
                return Ok((text.to_string(), next.kind));
            }

            let expected: Vec<_> = WORD_KINDS.iter().chain(terminators).copied().collect();
            return Err(expected_one_of(&expected, &next));
        }
    }

    /// Parses a date and requires it to name an existing calendar moment.
    fn parse_due_time(&mut self) -> Result<NaiveDateTime, ParserError> {
        let start = self.peek()?.start;
        let date = self.parse_date()?;
        let end = self.current.end;

        date.to_naive_datetime().ok_or_else(|| {
            let span = Token {
                kind: TokenKind::Number,
                text: &self.lexer.input()[start..end],
                start,
                end,
            };
            ParserError::invalid_date(&span, format!("{date} is not a valid date"))
        })
    }

    pub(super) fn consume(&mut self) -> Result<Token<'src>, ParserError> {
        let next = match self.lookahead.take() {
            Some(token) => token,
            None => self.lexer.scan_token()?,
        };

        self.previous = self.current;
        self.current = next;
        Ok(next)
    }

    /// One-token lookahead; the token is kept for the next [`Self::consume`].
    pub(super) fn peek(&mut self) -> Result<Token<'src>, ParserError> {
        if let Some(token) = self.lookahead {
            return Ok(token);
        }

        let token = self.lexer.scan_token()?;
        self.lookahead = Some(token);
        Ok(token)
    }

    pub(super) fn expect(&self, expected: TokenKind) -> Result<Token<'src>, ParserError> {
        if self.current.is(expected) {
            Ok(self.current)
        } else {
            Err(ParserError::unexpected(expected, &self.current))
        }
    }

    pub(super) fn expect_next(&mut self, expected: TokenKind) -> Result<Token<'src>, ParserError> {
        self.consume()?;
        self.expect(expected)
    }
}

fn expected_one_of(expected: &[TokenKind], got: &Token<'_>) -> ParserError {
    let names: Vec<String> = expected.iter().map(ToString::to_string).collect();
    let listed = match names.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        None => String::new(),
    };

    ParserError::new(
        ParserErrorKind::InvalidSyntax,
        got,
        format!("Expected one of {} got {}", listed, got.kind),
    )
}

#[cfg(test)]
mod tests;
