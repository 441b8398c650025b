use crate::item::{Item, ItemId, ItemKind};

pub type UserId = i64;
pub type ChatUserId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub chat_user_id: ChatUserId,
    pub name: String,
    pub reminders: Vec<Item>,
    pub tasks: Vec<Item>,
}

impl User {
    pub fn new(id: UserId, chat_user_id: ChatUserId, name: impl Into<String>) -> Self {
        Self {
            id,
            chat_user_id,
            name: name.into(),
            reminders: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn list_mut(&mut self, kind: ItemKind) -> &mut Vec<Item> {
        match kind {
            ItemKind::Reminder => &mut self.reminders,
            ItemKind::Task => &mut self.tasks,
        }
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.reminders.iter_mut().chain(&mut self.tasks)
    }

    pub fn push_item(&mut self, item: Item) {
        self.list_mut(item.kind).push(item);
    }

    pub fn extend_items(&mut self, items: impl IntoIterator<Item = Item>) {
        for item in items {
            self.push_item(item);
        }
    }

    /// Removes the first item named exactly `name`. The last item of the list
    /// takes its place.
    pub fn remove_by_name(&mut self, kind: ItemKind, name: &str) -> Option<Item> {
        let list = self.list_mut(kind);
        let index = list.iter().position(|item| item.name == name)?;

        Some(list.swap_remove(index))
    }

    pub fn remove_by_id(&mut self, id: ItemId) -> Option<Item> {
        [ItemKind::Reminder, ItemKind::Task]
            .into_iter()
            .find_map(|kind| {
                let list = self.list_mut(kind);
                let index = list.iter().position(|item| item.id == id)?;
                Some(list.swap_remove(index))
            })
    }
}
