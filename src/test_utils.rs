use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    delivery::{ChannelId, ChatChannel, MessageRef, StructuredMessage},
    item::{Item, ItemId},
    storage::{NewUser, Repository, StorageError},
    user::{ChatUserId, User, UserId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(ChannelId, String),
    Mention(ChannelId, ChatUserId, String),
    Structured(ChannelId, StructuredMessage),
    Marker(MessageRef, ItemId),
}

pub type SentMessages = Arc<Mutex<Vec<Sent>>>;

/// Records everything that would have been delivered.
#[derive(Default)]
pub struct RecordingChannel {
    pub sent: SentMessages,
    next_message_id: Mutex<i32>,
}

impl RecordingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn mentions(&self) -> Vec<(ChatUserId, String)> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Mention(_, user, name) => Some((user, name)),
                _ => None,
            })
            .collect()
    }

    pub fn structured(&self) -> Vec<StructuredMessage> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Structured(_, message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, channel: ChannelId, sent: Sent) -> MessageRef {
        let mut next = self.next_message_id.lock().unwrap();
        *next += 1;
        self.sent.lock().unwrap().push(sent);

        MessageRef {
            channel,
            message_id: *next,
        }
    }
}

#[async_trait]
impl ChatChannel for RecordingChannel {
    async fn send_text(&self, channel: ChannelId, text: &str) -> anyhow::Result<MessageRef> {
        Ok(self.record(channel, Sent::Text(channel, text.to_string())))
    }

    async fn mention_user(
        &self,
        channel: ChannelId,
        user: ChatUserId,
        name: &str,
    ) -> anyhow::Result<MessageRef> {
        Ok(self.record(channel, Sent::Mention(channel, user, name.to_string())))
    }

    async fn send_structured_message(
        &self,
        channel: ChannelId,
        message: &StructuredMessage,
    ) -> anyhow::Result<MessageRef> {
        Ok(self.record(channel, Sent::Structured(channel, message.clone())))
    }

    async fn add_acknowledgement_marker(
        &self,
        message: &MessageRef,
        item: ItemId,
    ) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(Sent::Marker(*message, item));
        Ok(())
    }
}

/// Every call fails, as an unreachable database would.
pub struct FailingRepository;

fn unavailable() -> StorageError {
    StorageError::Sqlx(sqlx::Error::PoolClosed)
}

#[async_trait]
impl Repository for FailingRepository {
    async fn find_user(&self, _chat_user_id: ChatUserId) -> Result<Option<User>, StorageError> {
        Err(unavailable())
    }

    async fn insert_user(&self, _new_user: NewUser) -> Result<User, StorageError> {
        Err(unavailable())
    }

    async fn get_all_users(&self) -> Result<Vec<User>, StorageError> {
        Err(unavailable())
    }

    async fn get_user_items(&self, _user_id: UserId) -> Result<Vec<Item>, StorageError> {
        Err(unavailable())
    }

    async fn insert_item(&self, _item: &Item, _owner: UserId) -> Result<(), StorageError> {
        Err(unavailable())
    }

    async fn delete_item(&self, _id: ItemId) -> Result<(), StorageError> {
        Err(unavailable())
    }

    async fn get_item_counter(&self) -> Result<ItemId, StorageError> {
        Err(unavailable())
    }
}
