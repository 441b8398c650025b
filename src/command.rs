use chrono::NaiveDateTime;

use crate::{
    delivery::StructuredMessage,
    item::{Item, ItemIdGenerator, ItemKind},
    user::User,
};

const DUE_FORMAT: &str = "%d %b %y %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    BriefMe,
    RemindMe,
    StaffMe,
    RemoveMe,
    HelpMe,
}

impl CommandKind {
    /// Keywords are matched case-sensitively.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "briefme" => Some(CommandKind::BriefMe),
            "remindme" => Some(CommandKind::RemindMe),
            "staffme" => Some(CommandKind::StaffMe),
            "removeme" => Some(CommandKind::RemoveMe),
            "helpme" => Some(CommandKind::HelpMe),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    BriefMe,
    RemindMe {
        identifier: String,
        due_time: NaiveDateTime,
    },
    StaffMe {
        identifier: String,
        due_time: Option<NaiveDateTime>,
    },
    RemoveMe {
        list: ItemKind,
        identifier: String,
    },
    HelpMe,
}

/// What happened to the user's lists, so the caller can mirror it in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemChange {
    Created(Item),
    Removed(Item),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub confirmation: StructuredMessage,
    pub change: Option<ItemChange>,
}

impl CommandOutcome {
    fn reply(confirmation: StructuredMessage) -> Self {
        Self {
            confirmation,
            change: None,
        }
    }
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::BriefMe => CommandKind::BriefMe,
            Command::RemindMe { .. } => CommandKind::RemindMe,
            Command::StaffMe { .. } => CommandKind::StaffMe,
            Command::RemoveMe { .. } => CommandKind::RemoveMe,
            Command::HelpMe => CommandKind::HelpMe,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self.kind() {
            CommandKind::BriefMe => "Brief me!",
            CommandKind::RemindMe => "Remind me!",
            CommandKind::StaffMe => "Staff me!",
            CommandKind::RemoveMe => "Remove me!",
            CommandKind::HelpMe => "Help me!",
        }
    }

    pub fn execute(&self, user: &mut User, ids: &ItemIdGenerator) -> CommandOutcome {
        match self {
            Command::BriefMe => CommandOutcome::reply(brief(user)),
            Command::RemindMe {
                identifier,
                due_time,
            } => {
                let item = Item::new_reminder(ids.next_id(), identifier.as_str(), *due_time);
                self.created(user, item, "Reminder has been added")
            }
            Command::StaffMe {
                identifier,
                due_time,
            } => {
                let item = Item::new_task(ids.next_id(), identifier.as_str(), *due_time);
                self.created(user, item, "Task has been added")
            }
            Command::RemoveMe { list, identifier } => match user.remove_by_name(*list, identifier) {
                Some(item) => CommandOutcome {
                    confirmation: StructuredMessage::new(self.describe())
                        .description(format!("{} has been removed", capitalized(*list))),
                    change: Some(ItemChange::Removed(item)),
                },
                None => CommandOutcome::reply(
                    StructuredMessage::new(self.describe())
                        .description(format!("{} {} does not exist", capitalized(*list), identifier)),
                ),
            },
            Command::HelpMe => CommandOutcome::reply(help()),
        }
    }

    fn created(&self, user: &mut User, item: Item, confirmation: &str) -> CommandOutcome {
        let message = StructuredMessage::new(self.describe())
            .description(confirmation)
            .field("Name", item.name.as_str())
            .field("Due", format_due(item.due_time));

        user.push_item(item.clone());

        CommandOutcome {
            confirmation: message,
            change: Some(ItemChange::Created(item)),
        }
    }
}

fn brief(user: &User) -> StructuredMessage {
    let reminders = user
        .reminders
        .iter()
        .map(|item| format!("🔸 {} || {}", item.name, format_due(item.due_time)))
        .collect::<Vec<_>>();

    let tasks = user
        .tasks
        .iter()
        .map(|item| {
            let marker = if item.done { "✅" } else { "❎" };
            match item.due_time {
                Some(due) => format!("{marker} {} || {}", item.name, due.format(DUE_FORMAT)),
                None => format!("{marker} {}", item.name),
            }
        })
        .collect::<Vec<_>>();

    StructuredMessage::new(Command::BriefMe.describe())
        .field("🔔 Reminders:", or_placeholder(reminders, "No active reminders"))
        .field("📋 Tasks:", or_placeholder(tasks, "No active tasks"))
}

fn help() -> StructuredMessage {
    StructuredMessage::new(Command::HelpMe.describe())
        .description("Dates are written as h:min, dd-mm, dd-mm-yy, dd-mm h:min or dd-mm-yy h:min")
        .field("!briefme", "List your reminders and tasks")
        .field("!remindme <text> | <date>", "Add a reminder")
        .field("!staffme <text> [| <date>]", "Add a task, the date is optional")
        .field("!removeme <reminder|task> | <text>", "Remove an item by name")
        .field("!helpme", "Show this message")
}

fn or_placeholder(lines: Vec<String>, placeholder: &str) -> String {
    if lines.is_empty() {
        placeholder.to_string()
    } else {
        lines.join("\n")
    }
}

fn format_due(due_time: Option<NaiveDateTime>) -> String {
    due_time.map_or_else(|| "-".to_string(), |due| due.format(DUE_FORMAT).to_string())
}

fn capitalized(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Reminder => "Reminder",
        ItemKind::Task => "Task",
    }
}
