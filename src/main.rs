use std::sync::Arc;

use chrono::Local;
use remindme::{
    app::App,
    appsettings::AppSettings,
    scheduling::DueDateWatcher,
    storage::sqlite::SqliteRepository,
    telegram::{TelegramChatChannel, TelegramInteractionInterface},
};
use teloxide::Bot;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::new()?;
    log::info!("Settings loaded, alarms: {:?}", settings.alarms);

    let repository = Arc::new(SqliteRepository::connect(&settings.storage.database_url).await?);
    let bot = Bot::new(settings.telegram.token.clone());
    let channel = Arc::new(TelegramChatChannel::new(bot.clone()));

    let app = Arc::new(
        App::load(
            repository,
            channel,
            settings.alarms,
            Local::now().naive_local(),
        )
        .await?,
    );

    let cancellation_token = CancellationToken::new();
    let watcher = DueDateWatcher::new(app.clone(), settings.notifications.channel_id)
        .spawn(cancellation_token.child_token());

    TelegramInteractionInterface::start(bot, app).await;

    cancellation_token.cancel();
    watcher.await?;
    log::info!("Graceful shutdown");

    Ok(())
}
