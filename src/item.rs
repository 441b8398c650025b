use std::{
    fmt::Display,
    sync::atomic::{AtomicI64, Ordering},
};

use chrono::NaiveDateTime;

pub type ItemId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Reminder,
    Task,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Reminder => "reminder",
            ItemKind::Task => "task",
        }
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reminder or a task owned by one user.
///
/// `alarm_count` and `last_remind_time` belong to the due-date watcher and are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub due_time: Option<NaiveDateTime>,
    pub alarm_count: u8,
    pub last_remind_time: Option<NaiveDateTime>,
    pub done: bool,
}

impl Item {
    pub fn new_reminder(id: ItemId, name: impl Into<String>, due_time: NaiveDateTime) -> Self {
        Self::new(id, name.into(), ItemKind::Reminder, Some(due_time))
    }

    pub fn new_task(id: ItemId, name: impl Into<String>, due_time: Option<NaiveDateTime>) -> Self {
        Self::new(id, name.into(), ItemKind::Task, due_time)
    }

    fn new(id: ItemId, name: String, kind: ItemKind, due_time: Option<NaiveDateTime>) -> Self {
        Self {
            id,
            name,
            kind,
            due_time,
            alarm_count: 0,
            last_remind_time: None,
            done: false,
        }
    }
}

/// Hands out item ids. Shared by every user, so ids are unique process-wide.
#[derive(Debug)]
pub struct ItemIdGenerator(AtomicI64);

impl ItemIdGenerator {
    pub fn starting_at(next: ItemId) -> Self {
        Self(AtomicI64::new(next))
    }

    pub fn next_id(&self) -> ItemId {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for ItemIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
