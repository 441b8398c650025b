//! Date sub-grammar.
//!
//! Accepted shapes are `h:min`, `dd-mm`, `dd-mm-yy`, `dd-mm h:min` and
//! `dd-mm-yy h:min`. A lone number is accepted too and means today at midnight.
//! A missing day/month/year falls back to today's date and a
//! missing time falls back to midnight. Two-digit years live in the 2000s.
//!
//! Hour and minute are taken literally, `99:99` resolves to hour 99 and minute
//! 99. Turning a [`Date`] into a calendar value is left to
//! [`Date::to_naive_datetime`].

use std::fmt::Display;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::error::ParserError;
use super::grammar::Parser;
use super::token::{Token, TokenKind};

const CENTURY: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub hour: u32,
    pub min: u32,
}

impl Date {
    /// `None` when the fields do not name an existing moment, e.g. `31-02` or `25:00`.
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(self.hour, self.min, 0)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{} {:02}:{:02}",
            self.day, self.month, self.year, self.hour, self.min
        )
    }
}

struct DayMonthYear<'src> {
    day: Token<'src>,
    month: Token<'src>,
    year: Option<Token<'src>>,
}

struct HourMin<'src> {
    hour: Token<'src>,
    min: Token<'src>,
}

impl<'src> Parser<'src> {
    pub(super) fn parse_date(&mut self) -> Result<Date, ParserError> {
        let first = self.expect_next(TokenKind::Number)?;

        match self.peek()?.kind {
            TokenKind::Dash => {
                let day_month_year = self.parse_day_month_year(first)?;
                let hour_min = if self.peek()?.is(TokenKind::Number) {
                    let hour = self.consume()?;
                    Some(self.parse_hour_min(hour)?)
                } else {
                    None
                };

                resolve(Some(day_month_year), hour_min, self.now.date())
            }
            TokenKind::Colon => {
                let hour_min = self.parse_hour_min(first)?;
                resolve(None, Some(hour_min), self.now.date())
            }
            // A lone number names no field, so the whole date defaults.
            _ => resolve(None, None, self.now.date()),
        }
    }

    fn parse_day_month_year(&mut self, day: Token<'src>) -> Result<DayMonthYear<'src>, ParserError> {
        self.expect_next(TokenKind::Dash)?;
        let month = self.expect_next(TokenKind::Number)?;

        let year = if self.peek()?.is(TokenKind::Dash) {
            self.consume()?;
            Some(self.expect_next(TokenKind::Number)?)
        } else {
            None
        };

        Ok(DayMonthYear { day, month, year })
    }

    fn parse_hour_min(&mut self, hour: Token<'src>) -> Result<HourMin<'src>, ParserError> {
        self.expect_next(TokenKind::Colon)?;
        let min = self.expect_next(TokenKind::Number)?;

        Ok(HourMin { hour, min })
    }
}

fn resolve(
    day_month_year: Option<DayMonthYear<'_>>,
    hour_min: Option<HourMin<'_>>,
    today: NaiveDate,
) -> Result<Date, ParserError> {
    let (day, month, year) = match day_month_year {
        Some(DayMonthYear { day, month, year }) => (
            number(&day)?,
            number(&month)?,
            year.map(|year| two_digit_year(&year))
                .transpose()?
                .unwrap_or(today.year()),
        ),
        None => (today.day(), today.month(), today.year()),
    };

    let (hour, min) = match hour_min {
        Some(HourMin { hour, min }) => (number(&hour)?, number(&min)?),
        None => (0, 0),
    };

    Ok(Date {
        day,
        month,
        year,
        hour,
        min,
    })
}

fn number(token: &Token<'_>) -> Result<u32, ParserError> {
    token
        .text
        .parse()
        .map_err(|_| ParserError::invalid_date(token, format!("{} is out of range", token.text)))
}

fn two_digit_year(token: &Token<'_>) -> Result<i32, ParserError> {
    if token.text.len() != 2 {
        return Err(ParserError::invalid_date(
            token,
            format!("year {} must be written with two digits", token.text),
        ));
    }

    let year: i32 = token
        .text
        .parse()
        .map_err(|_| ParserError::invalid_date(token, format!("{} is not a year", token.text)))?;

    Ok(CENTURY + year)
}
