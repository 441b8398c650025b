use async_trait::async_trait;

use crate::{item::ItemId, user::ChatUserId};

pub type ChannelId = i64;

/// Identifies a message the transport already delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub channel: ChannelId,
    pub message_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageField {
    pub name: String,
    pub value: String,
}

/// Transport-neutral rich message: a title, an optional description and a list
/// of named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredMessage {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<MessageField>,
}

impl StructuredMessage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(MessageField {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

#[async_trait]
pub trait ChatChannel: Send + Sync + 'static {
    async fn send_text(&self, channel: ChannelId, text: &str) -> anyhow::Result<MessageRef>;

    /// Pings `user` in `channel`, whether or not they have a public handle.
    async fn mention_user(
        &self,
        channel: ChannelId,
        user: ChatUserId,
        name: &str,
    ) -> anyhow::Result<MessageRef>;

    async fn send_structured_message(
        &self,
        channel: ChannelId,
        message: &StructuredMessage,
    ) -> anyhow::Result<MessageRef>;

    /// Attaches a control to `message` that reports `item` back as acknowledged.
    async fn add_acknowledgement_marker(
        &self,
        message: &MessageRef,
        item: ItemId,
    ) -> anyhow::Result<()>;
}
