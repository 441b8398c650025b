mod alarm;
mod watcher;

pub use alarm::{Alarm, format_remaining, next_alarm, restore_alarm_count};
pub use watcher::DueDateWatcher;
