use chrono::{NaiveDateTime, TimeDelta};

use crate::{appsettings::AlarmSettings, item::Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alarm {
    /// The item is due within `threshold_minutes`.
    Approaching {
        threshold_minutes: i64,
        remaining: TimeDelta,
    },
    Overdue,
}

/// Decides whether `item` needs an alarm at `now` and records it on the item.
///
/// Each pre-due threshold is announced at most once; overdue items are nagged
/// right away and then every `repeat_minutes`.
pub fn next_alarm(item: &mut Item, now: NaiveDateTime, settings: &AlarmSettings) -> Option<Alarm> {
    if item.done {
        return None;
    }

    let remaining = item.due_time? - now;
    let first = TimeDelta::minutes(settings.first_minutes);
    let second = TimeDelta::minutes(settings.second_minutes);

    if remaining <= TimeDelta::zero() {
        let nag_due = item
            .last_remind_time
            .is_none_or(|last| now - last >= TimeDelta::minutes(settings.repeat_minutes));
        if !nag_due {
            return None;
        }

        item.last_remind_time = Some(now);
        return Some(Alarm::Overdue);
    }

    if remaining <= second && item.alarm_count < 2 {
        item.alarm_count = 2;
        return Some(Alarm::Approaching {
            threshold_minutes: settings.second_minutes,
            remaining,
        });
    }

    if remaining <= first && remaining > second && item.alarm_count == 0 {
        item.alarm_count = 1;
        return Some(Alarm::Approaching {
            threshold_minutes: settings.first_minutes,
            remaining,
        });
    }

    None
}

/// Marks thresholds that `now` is already past, so items loaded at start-up do
/// not announce them again.
pub fn restore_alarm_count(item: &mut Item, now: NaiveDateTime, settings: &AlarmSettings) {
    let Some(due_time) = item.due_time else {
        return;
    };

    let remaining = due_time - now;
    item.alarm_count = if remaining <= TimeDelta::minutes(settings.second_minutes) {
        2
    } else if remaining <= TimeDelta::minutes(settings.first_minutes) {
        1
    } else {
        0
    };
}

/// Rounds up to whole minutes, e.g. `1h 05m` or `12m`.
pub fn format_remaining(remaining: TimeDelta) -> String {
    let minutes = (remaining.num_seconds() + 59).div_euclid(60).max(0);
    match (minutes / 60, minutes % 60) {
        (0, minutes) => format!("{minutes}m"),
        (hours, minutes) => format!("{hours}h {minutes:02}m"),
    }
}
