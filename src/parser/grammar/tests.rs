use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::*;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(9, 41, 0).unwrap())
}

fn at(day: u32, month: u32, year: i32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn parse(input: &str) -> Result<Option<Command>, ParserError> {
    parse_command_at(input, now())
}

fn parse_err(input: &str) -> ParserError {
    parse(input).unwrap_err()
}

#[test]
fn brief_me() {
    assert_eq!(parse("!briefme").unwrap(), Some(Command::BriefMe));
}

#[test]
fn help_me() {
    assert_eq!(parse("  !helpme").unwrap(), Some(Command::HelpMe));
}

#[test]
fn remind_me_with_time_only_is_due_today() {
    let command = parse("!remindme buy milk | 18:30").unwrap();

    assert_eq!(
        command,
        Some(Command::RemindMe {
            identifier: "buy milk".to_string(),
            due_time: at(14, 3, 2025, 18, 30),
        })
    );
}

#[test]
fn remind_me_with_full_date() {
    let command = parse("!remindme dentist|01-04-25 08:15").unwrap();

    assert_eq!(
        command,
        Some(Command::RemindMe {
            identifier: "dentist".to_string(),
            due_time: at(1, 4, 2025, 8, 15),
        })
    );
}

#[test]
fn remind_me_with_a_lone_number_is_due_at_midnight() {
    let command = parse("!remindme x | 12").unwrap();

    assert_eq!(
        command,
        Some(Command::RemindMe {
            identifier: "x".to_string(),
            due_time: at(14, 3, 2025, 0, 0),
        })
    );
}

#[test]
fn name_keeps_inner_spacing_and_emotes() {
    let command = parse("!staffme water  :cactus: 2 times").unwrap();

    assert_eq!(
        command,
        Some(Command::StaffMe {
            identifier: "water  :cactus: 2 times".to_string(),
            due_time: None,
        })
    );
}

#[test]
fn staff_me_with_date() {
    let command = parse("!staffme report | 20-03").unwrap();

    assert_eq!(
        command,
        Some(Command::StaffMe {
            identifier: "report".to_string(),
            due_time: Some(at(20, 3, 2025, 0, 0)),
        })
    );
}

#[test]
fn remove_me_from_each_list() {
    assert_eq!(
        parse("!removeme task | report").unwrap(),
        Some(Command::RemoveMe {
            list: ItemKind::Task,
            identifier: "report".to_string(),
        })
    );
    assert_eq!(
        parse("!removeme reminder|buy milk").unwrap(),
        Some(Command::RemoveMe {
            list: ItemKind::Reminder,
            identifier: "buy milk".to_string(),
        })
    );
}

#[test]
fn empty_input_is_no_command() {
    assert_eq!(parse("").unwrap(), None);
    assert_eq!(parse(" \t ").unwrap(), None);
}

#[test]
fn only_the_first_command_is_parsed() {
    assert_eq!(parse("!briefme !helpme").unwrap(), Some(Command::BriefMe));
}

#[test]
fn unknown_keyword() {
    let error = parse_err("!bogus");

    assert_eq!(error.kind, ParserErrorKind::UnknownCommand);
    assert_eq!(error.details, "!bogus");
    assert_eq!(error.span, 1..6);
    assert_eq!(error.to_string(), "Unknown command: !bogus");
}

#[test]
fn text_without_bang() {
    let error = parse_err("hello");

    assert_eq!(error.kind, ParserErrorKind::InvalidSyntax);
    assert_eq!(error.details, "Expected Bang got Identifier");
}

#[test]
fn bang_without_keyword() {
    let error = parse_err("! remindme");

    // Whitespace is skipped, so this is still a valid keyword.
    assert_eq!(error.kind, ParserErrorKind::InvalidSyntax);
    assert_eq!(
        error.details,
        "Expected one of Identifier, Emote or Number got EOF"
    );

    let error = parse_err("!12");
    assert_eq!(error.details, "Expected Identifier got Number");
}

#[test]
fn remind_me_needs_a_separator() {
    let error = parse_err("!remindme buy milk");

    assert_eq!(error.kind, ParserErrorKind::InvalidSyntax);
    assert_eq!(
        error.details,
        "Expected one of Identifier, Emote, Number or Separator got EOF"
    );
}

#[test]
fn remind_me_needs_a_date() {
    let error = parse_err("!remindme buy milk |");

    assert_eq!(error.kind, ParserErrorKind::InvalidSyntax);
    assert_eq!(error.details, "Expected Number got EOF");
}

#[test]
fn remind_me_needs_a_name() {
    let error = parse_err("!remindme | 18:30");

    assert_eq!(error.kind, ParserErrorKind::InvalidSyntax);
    assert_eq!(
        error.details,
        "Expected one of Identifier, Emote or Number got Separator"
    );
}

#[test]
fn remove_me_rejects_unknown_list() {
    let error = parse_err("!removeme chores | dishes");

    assert_eq!(error.kind, ParserErrorKind::InvalidSyntax);
    assert_eq!(error.details, "Expected reminder or task got chores");
    assert_eq!(error.span, 10..16);
}

#[test]
fn remove_me_needs_a_separator() {
    let error = parse_err("!removeme task report");

    assert_eq!(error.details, "Expected Separator got Identifier");
}

#[test]
fn impossible_time_is_an_invalid_date() {
    let error = parse_err("!remindme x | 99:99");

    assert_eq!(error.kind, ParserErrorKind::InvalidDate);
    assert_eq!(error.span, 14..19);
    assert_eq!(error.to_string(), "Invalid date: 14-03-2025 99:99 is not a valid date");
}

#[test]
fn impossible_day_is_an_invalid_date() {
    let error = parse_err("!staffme x | 31-02");

    assert_eq!(error.kind, ParserErrorKind::InvalidDate);
}

#[test]
fn invalid_character_fails_the_whole_command() {
    let error = parse_err("!remindme buy milk? | 18:30");

    assert_eq!(error.kind, ParserErrorKind::InvalidToken);
    assert_eq!(error.details, "?");
}
