use std::{sync::Arc, time::Duration};

use chrono::{Local, NaiveDateTime};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    app::App,
    delivery::{ChannelId, StructuredMessage},
    item::{Item, ItemKind},
    user::ChatUserId,
};

use super::alarm::{Alarm, format_remaining, next_alarm};

const SCAN_INTERVAL: Duration = Duration::from_secs(1);

/// Polls every user's items and posts alarms to one notification channel.
pub struct DueDateWatcher {
    app: Arc<App>,
    notification_channel: ChannelId,
    interval: Duration,
}

impl DueDateWatcher {
    pub fn new(app: Arc<App>, notification_channel: ChannelId) -> Self {
        Self {
            app,
            notification_channel,
            interval: SCAN_INTERVAL,
        }
    }

    pub fn spawn(self, cancellation_token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancellation_token).await })
    }

    async fn run(self, cancellation_token: CancellationToken) {
        log::info!(
            "Due-date watcher started, posting to {}",
            self.notification_channel
        );

        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {
                    self.scan(Local::now().naive_local()).await;
                }
            }
        }

        log::info!("Due-date watcher stopped");
    }

    /// One pass over all items, holding the user lock throughout.
    pub async fn scan(&self, now: NaiveDateTime) {
        let mut users = self.app.lock_users().await;
        let settings = *self.app.alarms();

        for user in users.values_mut() {
            let (owner, name) = (user.chat_user_id, user.name.clone());
            for item in user.items_mut() {
                if let Some(alarm) = next_alarm(item, now, &settings) {
                    self.notify(owner, &name, item, alarm).await;
                }
            }
        }
    }

    async fn notify(&self, owner: ChatUserId, name: &str, item: &Item, alarm: Alarm) {
        log::info!("Sending {:?} for item {}", alarm, item.id);
        let channel = self.app.channel();

        if let Err(e) = channel
            .mention_user(self.notification_channel, owner, name)
            .await
        {
            log::error!("Failed to mention {} for item {}: {:?}", owner, item.id, e);
        }

        let message = alarm_message(item, alarm);
        let sent = match channel
            .send_structured_message(self.notification_channel, &message)
            .await
        {
            Ok(sent) => sent,
            Err(e) => {
                log::error!("Failed to send alarm for item {}: {:?}", item.id, e);
                return;
            }
        };

        if alarm == Alarm::Overdue {
            if let Err(e) = channel.add_acknowledgement_marker(&sent, item.id).await {
                log::error!("Failed to attach marker for item {}: {:?}", item.id, e);
            }
        }
    }
}

fn alarm_message(item: &Item, alarm: Alarm) -> StructuredMessage {
    let title = match item.kind {
        ItemKind::Reminder => "Reminder Notification",
        ItemKind::Task => "Task Notification",
    };

    let description = match alarm {
        Alarm::Approaching {
            threshold_minutes,
            remaining,
        } => format!(
            "{} is in less than {} minutes (~{})",
            item.name,
            threshold_minutes,
            format_remaining(remaining)
        ),
        Alarm::Overdue => format!("Have you done {}?", item.name),
    };

    let message = StructuredMessage::new(title).description(description);
    match item.due_time {
        Some(due) => message.field("Due", due.format("%d %b %y %H:%M").to_string()),
        None => message,
    }
}
