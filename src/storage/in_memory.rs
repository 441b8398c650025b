use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    item::{Item, ItemId},
    user::{ChatUserId, User, UserId},
};

use super::{NewUser, Repository, StorageError};

#[derive(Default)]
struct Store {
    next_user_id: UserId,
    next_item_id: ItemId,
    users: HashMap<UserId, User>,
    items: HashMap<ItemId, (UserId, Item)>,
}

/// Process-local repository, used in tests and when no database is configured.
pub struct InMemoryRepository {
    store: RwLock<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        InMemoryRepository {
            store: RwLock::new(Store {
                next_user_id: 1,
                next_item_id: 1,
                ..Default::default()
            }),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn find_user(&self, chat_user_id: ChatUserId) -> Result<Option<User>, StorageError> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|user| user.chat_user_id == chat_user_id)
            .cloned())
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, StorageError> {
        let mut store = self.store.write().await;
        let id = store.next_user_id;
        let user = User::new(id, new_user.chat_user_id, new_user.name);

        store.users.insert(id, user.clone());
        store.next_user_id += 1;
        log::debug!("Stored user {} in memory", id);
        Ok(user)
    }

    async fn get_all_users(&self) -> Result<Vec<User>, StorageError> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn get_user_items(&self, user_id: UserId) -> Result<Vec<Item>, StorageError> {
        let store = self.store.read().await;
        let mut items: Vec<Item> = store
            .items
            .values()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, item)| item.clone())
            .collect();

        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn insert_item(&self, item: &Item, owner: UserId) -> Result<(), StorageError> {
        let mut store = self.store.write().await;
        if !store.users.contains_key(&owner) {
            return Err(StorageError::UnknownUser(owner));
        }
        if store.items.contains_key(&item.id) {
            return Err(StorageError::DuplicateItem(item.id));
        }

        store.items.insert(item.id, (owner, item.clone()));
        store.next_item_id = store.next_item_id.max(item.id + 1);
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), StorageError> {
        let mut store = self.store.write().await;
        store
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::ItemNotFound(id))
    }

    async fn get_item_counter(&self) -> Result<ItemId, StorageError> {
        Ok(self.store.read().await.next_item_id)
    }
}
