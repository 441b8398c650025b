mod delivery_channel;
mod util;

pub use delivery_channel::TelegramChatChannel;

use std::sync::Arc;

use teloxide::{dispatching::UpdateHandler, dptree, prelude::*, utils::markdown};
use util::{clear_message_buttons, parse_item_id, try_get_message_from_query};

use crate::app::{App, InboundMessage};

type HandlerResult = anyhow::Result<()>;

pub struct TelegramInteractionInterface;
impl TelegramInteractionInterface {
    /// Runs until the process receives Ctrl+C.
    pub async fn start(bot: Bot, app: Arc<App>) {
        log::info!("Starting Telegram interaction interface");

        Dispatcher::builder(bot, schema())
            .dependencies(dptree::deps![app])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await
    }
}

fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(receive_message))
        .branch(Update::filter_callback_query().endpoint(receive_acknowledgement))
}

async fn receive_message(app: Arc<App>, msg: Message) -> HandlerResult {
    let (Some(text), Some(author)) = (msg.text(), msg.from.as_ref()) else {
        return Ok(());
    };
    if author.is_bot {
        return Ok(());
    }

    let author_name = author
        .username
        .clone()
        .unwrap_or_else(|| author.first_name.clone());

    app.handle_message(InboundMessage {
        channel: msg.chat.id.0,
        author: i64::try_from(author.id.0)?,
        author_name,
        text: text.to_string(),
    })
    .await;

    Ok(())
}

async fn receive_acknowledgement(bot: Bot, app: Arc<App>, query: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(item_id) = parse_item_id(&query) else {
        log::warn!("Ignoring callback query with data {:?}", query.data);
        return Ok(());
    };

    let chat_user = i64::try_from(query.from.id.0)?;
    let Some(item) = app.acknowledge_item(chat_user, item_id).await else {
        return Ok(());
    };

    if let Some(message) = try_get_message_from_query(&query) {
        clear_message_buttons(&bot, message).await?;
        bot.send_message(message.chat.id, format!("✅ {}", markdown::bold(&markdown::escape(&item.name))))
            .parse_mode(teloxide::types::ParseMode::MarkdownV2)
            .await?;
    }

    Ok(())
}
