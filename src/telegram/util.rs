use teloxide::{
    Bot,
    payloads::EditMessageReplyMarkupSetters,
    sugar::bot::BotMessagesExt,
    types::{CallbackQuery, InlineKeyboardMarkup, MaybeInaccessibleMessage, Message},
};

use crate::item::ItemId;

pub fn try_get_message_from_query(query: &CallbackQuery) -> Option<&Message> {
    query.message.as_ref().and_then(|msg| match msg {
        MaybeInaccessibleMessage::Inaccessible(_) => None,
        MaybeInaccessibleMessage::Regular(message) => Some(message.as_ref()),
    })
}

pub async fn clear_message_buttons(bot: &Bot, message: &Message) -> Result<(), anyhow::Error> {
    bot.edit_reply_markup(message)
        .reply_markup(InlineKeyboardMarkup::default())
        .await?;

    Ok(())
}

/// Callback data of the "Done" button is the bare item id.
pub fn parse_item_id(query: &CallbackQuery) -> Option<ItemId> {
    query.data.as_deref()?.trim().parse().ok()
}
