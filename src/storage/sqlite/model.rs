use chrono::NaiveDateTime;

use crate::{
    item::{Item, ItemKind},
    user::User,
};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserStorageModel {
    pub id: i64,
    pub chat_user_id: i64,
    pub name: String,
}

impl From<UserStorageModel> for User {
    fn from(value: UserStorageModel) -> Self {
        User::new(value.id, value.chat_user_id, value.name)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemStorageModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub kind: String,
    pub due_time: Option<NaiveDateTime>,
    pub done: bool,
}

impl ItemStorageModel {
    pub fn new(item: &Item, user_id: i64) -> Self {
        Self {
            id: item.id,
            user_id,
            name: item.name.clone(),
            kind: convert_kind(item.kind),
            due_time: item.due_time,
            done: item.done,
        }
    }
}

impl From<ItemStorageModel> for Item {
    fn from(value: ItemStorageModel) -> Self {
        Self {
            id: value.id,
            name: value.name,
            kind: parse_kind(&value.kind, value.due_time),
            due_time: value.due_time,
            alarm_count: 0,
            last_remind_time: None,
            done: value.done,
        }
    }
}

fn convert_kind(kind: ItemKind) -> String {
    kind.as_str().to_string()
}

fn parse_kind(kind: &str, due_time: Option<NaiveDateTime>) -> ItemKind {
    match kind {
        "reminder" if due_time.is_some() => ItemKind::Reminder,
        "reminder" => {
            log::warn!("Warning: Reminder without due time, loading it as a task");
            ItemKind::Task
        }
        "task" => ItemKind::Task,
        other => {
            log::warn!("Warning: Unknown item kind {}, defaulting to task", other);
            ItemKind::Task
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;

    use super::*;

    fn arb_item() -> impl Strategy<Value = Item> {
        (
            any::<i64>(),
            "[a-z ]{1,20}",
            any::<bool>(),
            arb::<NaiveDateTime>(),
            any::<bool>(),
        )
            .prop_map(|(id, name, is_reminder, due, done)| {
                let mut item = if is_reminder {
                    Item::new_reminder(id, name, due)
                } else {
                    Item::new_task(id, name, None)
                };
                item.done = done;
                item
            })
    }

    proptest! {
        #[test]
        fn item_survives_storage_model(item in arb_item(), user_id in any::<i64>()) {
            let model = ItemStorageModel::new(&item, user_id);
            prop_assert_eq!(model.user_id, user_id);

            let restored: Item = model.into();
            prop_assert_eq!(restored, item);
        }

        #[test]
        fn unknown_kind_falls_back_to_task(kind in "[A-Z]{1,10}") {
            prop_assert_eq!(parse_kind(&kind, None), ItemKind::Task);
        }
    }

    #[test]
    fn reminder_without_due_time_loads_as_task() {
        assert_eq!(parse_kind("reminder", None), ItemKind::Task);
    }
}
