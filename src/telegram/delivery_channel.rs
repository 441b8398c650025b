use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode, UserId},
    utils::markdown::{bold, escape, user_mention},
};

use crate::{
    delivery::{ChannelId, ChatChannel, MessageRef, StructuredMessage},
    item::ItemId,
    user::ChatUserId,
};

pub struct TelegramChatChannel {
    bot: Bot,
}

impl TelegramChatChannel {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatChannel for TelegramChatChannel {
    async fn send_text(&self, channel: ChannelId, text: &str) -> anyhow::Result<MessageRef> {
        let sent = self.bot.send_message(ChatId(channel), text).await?;
        Ok(message_ref(&sent))
    }

    async fn mention_user(
        &self,
        channel: ChannelId,
        user: ChatUserId,
        name: &str,
    ) -> anyhow::Result<MessageRef> {
        let sent = self
            .bot
            .send_message(ChatId(channel), render_mention(user, name)?)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;

        Ok(message_ref(&sent))
    }

    async fn send_structured_message(
        &self,
        channel: ChannelId,
        message: &StructuredMessage,
    ) -> anyhow::Result<MessageRef> {
        let sent = self
            .bot
            .send_message(ChatId(channel), render_markdown(message))
            .parse_mode(ParseMode::MarkdownV2)
            .await?;

        Ok(message_ref(&sent))
    }

    async fn add_acknowledgement_marker(
        &self,
        message: &MessageRef,
        item: ItemId,
    ) -> anyhow::Result<()> {
        let done_button = InlineKeyboardButton::callback("Done", item.to_string());

        self.bot
            .edit_message_reply_markup(ChatId(message.channel), MessageId(message.message_id))
            .reply_markup(InlineKeyboardMarkup::new(vec![vec![done_button]]))
            .await?;

        Ok(())
    }
}

fn message_ref(message: &Message) -> MessageRef {
    MessageRef {
        channel: message.chat.id.0,
        message_id: message.id.0,
    }
}

/// Links to the user's id, so first-name-only accounts get pinged too.
pub fn render_mention(user: ChatUserId, name: &str) -> anyhow::Result<String> {
    Ok(user_mention(UserId(u64::try_from(user)?), &escape(name)))
}

/// Bold title, plain description, then one bold heading per field.
pub fn render_markdown(message: &StructuredMessage) -> String {
    let mut lines = vec![bold(&escape(&message.title))];

    if let Some(description) = &message.description {
        lines.push(escape(description));
    }

    for field in &message.fields {
        lines.push(String::new());
        lines.push(bold(&escape(&field.name)));
        lines.push(escape(&field.value));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_escapes_everything_but_the_markup() {
        let message = StructuredMessage::new("Brief me!")
            .description("a-b")
            .field("📋 Tasks:", "No active tasks");

        assert_eq!(
            render_markdown(&message),
            "*Brief me\\!*\na\\-b\n\n*📋 Tasks:*\nNo active tasks"
        );
    }

    #[test]
    fn mention_links_to_the_user_id() {
        assert_eq!(
            render_mention(1234, "Ana.B").unwrap(),
            "[Ana\\.B](tg://user?id=1234)"
        );
    }

    #[test]
    fn negative_ids_cannot_be_mentioned() {
        assert!(render_mention(-5, "group").is_err());
    }

    #[test]
    fn title_only() {
        assert_eq!(render_markdown(&StructuredMessage::new("Hi")), "*Hi*");
    }
}
