use async_trait::async_trait;
use thiserror::Error;

use crate::{
    item::{Item, ItemId},
    user::{ChatUserId, User, UserId},
};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Item {0} does not exist")]
    ItemNotFound(ItemId),

    #[error("Item {0} already exists")]
    DuplicateItem(ItemId),

    #[error("User {0} does not exist")]
    UnknownUser(UserId),
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub chat_user_id: ChatUserId,
    pub name: String,
}

/// Durable home of users and their items. Users come back with empty lists;
/// items are loaded separately with [`Repository::get_user_items`].
///
/// Inserting an item raises the stored item counter past its id, and deleting
/// never lowers it, so an id is never handed out twice.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn find_user(&self, chat_user_id: ChatUserId) -> Result<Option<User>, StorageError>;
    async fn insert_user(&self, new_user: NewUser) -> Result<User, StorageError>;
    async fn get_all_users(&self) -> Result<Vec<User>, StorageError>;
    async fn get_user_items(&self, user_id: UserId) -> Result<Vec<Item>, StorageError>;
    async fn insert_item(&self, item: &Item, owner: UserId) -> Result<(), StorageError>;
    async fn delete_item(&self, id: ItemId) -> Result<(), StorageError>;
    /// The lowest id no stored item has ever used.
    async fn get_item_counter(&self) -> Result<ItemId, StorageError>;
}
