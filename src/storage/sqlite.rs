mod model;

use std::str::FromStr;

use async_trait::async_trait;
use model::{ItemStorageModel, UserStorageModel};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{
    item::{Item, ItemId},
    user::{ChatUserId, User, UserId},
};

use super::{NewUser, Repository, StorageError};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `url` and applies pending
    /// migrations.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn find_user(&self, chat_user_id: ChatUserId) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, UserStorageModel>(
            "SELECT id, chat_user_id, name FROM users WHERE chat_user_id = ?",
        )
        .bind(chat_user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(Into::into))
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, StorageError> {
        let NewUser { chat_user_id, name } = new_user;
        let user = sqlx::query_as::<_, UserStorageModel>(
            "INSERT INTO users (chat_user_id, name)
                 VALUES (?, ?)
                 RETURNING id, chat_user_id, name",
        )
        .bind(chat_user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user.into())
    }

    async fn get_all_users(&self) -> Result<Vec<User>, StorageError> {
        let users = sqlx::query_as::<_, UserStorageModel>("SELECT id, chat_user_id, name FROM users")
            .fetch_all(&self.pool)
            .await?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    async fn get_user_items(&self, user_id: UserId) -> Result<Vec<Item>, StorageError> {
        let items = sqlx::query_as::<_, ItemStorageModel>(
            "SELECT id, user_id, name, kind, due_time, done
                 FROM items
                 WHERE user_id = ?
                 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items.into_iter().map(Into::into).collect())
    }

    async fn insert_item(&self, item: &Item, owner: UserId) -> Result<(), StorageError> {
        let ItemStorageModel {
            id,
            user_id,
            name,
            kind,
            due_time,
            done,
        } = ItemStorageModel::new(item, owner);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO items (id, user_id, name, kind, due_time, done)
                 VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(kind)
        .bind(due_time)
        .bind(done)
        .execute(&mut *tx)
        .await
        .map_err(|error| match error {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StorageError::DuplicateItem(id)
            }
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                StorageError::UnknownUser(owner)
            }
            other => other.into(),
        })?;

        sqlx::query("UPDATE item_counter SET next_id = MAX(next_id, ?) WHERE id = 1")
            .bind(id + 1)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::ItemNotFound(id));
        }

        Ok(())
    }

    async fn get_item_counter(&self) -> Result<ItemId, StorageError> {
        let next_id: i64 = sqlx::query_scalar("SELECT next_id FROM item_counter WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?
            .unwrap_or(1);

        Ok(next_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    async fn repository() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let repository = SqliteRepository::new(pool);
        repository.migrate().await.unwrap();
        repository
    }

    fn new_user(chat_user_id: ChatUserId) -> NewUser {
        NewUser {
            chat_user_id,
            name: "ana".to_string(),
        }
    }

    #[tokio::test]
    async fn inserted_user_is_found_by_chat_id() {
        let repository = repository().await;

        let user = repository.insert_user(new_user(42)).await.unwrap();

        assert_eq!(user.chat_user_id, 42);
        assert_eq!(repository.find_user(42).await.unwrap(), Some(user));
        assert_eq!(repository.find_user(43).await.unwrap(), None);
    }

    #[tokio::test]
    async fn items_are_loaded_per_user() {
        let repository = repository().await;
        let ana = repository.insert_user(new_user(1)).await.unwrap();
        let bob = repository.insert_user(new_user(2)).await.unwrap();
        let due = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let reminder = Item::new_reminder(5, "pick up the milk", due);
        let task = Item::new_task(6, "finish writing unit tests", None);

        repository.insert_item(&reminder, ana.id).await.unwrap();
        repository.insert_item(&task, ana.id).await.unwrap();
        repository
            .insert_item(&Item::new_task(7, "other", None), bob.id)
            .await
            .unwrap();

        let items = repository.get_user_items(ana.id).await.unwrap();
        assert_eq!(items, vec![reminder, task]);
        assert_eq!(repository.get_all_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_and_missing_items_are_reported() {
        let repository = repository().await;
        let ana = repository.insert_user(new_user(1)).await.unwrap();
        let item = Item::new_task(1, "a", None);
        repository.insert_item(&item, ana.id).await.unwrap();

        assert!(matches!(
            repository.insert_item(&item, ana.id).await,
            Err(StorageError::DuplicateItem(1))
        ));

        repository.delete_item(1).await.unwrap();
        assert!(matches!(
            repository.delete_item(1).await,
            Err(StorageError::ItemNotFound(1))
        ));
    }

    #[tokio::test]
    async fn item_counter_survives_deleting_the_newest_item() {
        let repository = repository().await;
        assert_eq!(repository.get_item_counter().await.unwrap(), 1);
        let ana = repository.insert_user(new_user(1)).await.unwrap();
        repository
            .insert_item(&Item::new_task(4, "keep", None), ana.id)
            .await
            .unwrap();
        repository
            .insert_item(&Item::new_task(9, "old", None), ana.id)
            .await
            .unwrap();

        repository.delete_item(9).await.unwrap();

        assert_eq!(repository.get_item_counter().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn failed_insert_leaves_the_counter_alone() {
        let repository = repository().await;

        assert!(repository
            .insert_item(&Item::new_task(5, "orphan", None), 99)
            .await
            .is_err());

        assert_eq!(repository.get_item_counter().await.unwrap(), 1);
    }
}
