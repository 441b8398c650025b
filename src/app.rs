use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDateTime;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    appsettings::AlarmSettings,
    command::{Command, ItemChange},
    delivery::{ChannelId, ChatChannel, StructuredMessage},
    item::{Item, ItemId, ItemIdGenerator},
    parser::{self, ParserError},
    scheduling::restore_alarm_count,
    storage::{NewUser, Repository, StorageError},
    user::{ChatUserId, User},
};

pub type Users = HashMap<ChatUserId, User>;

/// A chat message as the transport hands it over.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub channel: ChannelId,
    pub author: ChatUserId,
    pub author_name: String,
    pub text: String,
}

/// Shared bot state. Every user lives behind one lock, taken for a whole
/// command, a whole watcher pass or a whole acknowledgement.
pub struct App {
    users: Mutex<Users>,
    ids: ItemIdGenerator,
    repository: Arc<dyn Repository>,
    channel: Arc<dyn ChatChannel>,
    alarms: AlarmSettings,
}

impl App {
    pub fn new(
        repository: Arc<dyn Repository>,
        channel: Arc<dyn ChatChannel>,
        alarms: AlarmSettings,
    ) -> Self {
        Self::with_users(Users::new(), ItemIdGenerator::default(), repository, channel, alarms)
    }

    fn with_users(
        users: Users,
        ids: ItemIdGenerator,
        repository: Arc<dyn Repository>,
        channel: Arc<dyn ChatChannel>,
        alarms: AlarmSettings,
    ) -> Self {
        Self {
            users: Mutex::new(users),
            ids,
            repository,
            channel,
            alarms,
        }
    }

    /// Loads every stored user with their items. Alarms whose threshold has
    /// already passed at `now` are marked as sent, and new ids continue after
    /// the highest id storage has ever seen, deleted items included.
    pub async fn load(
        repository: Arc<dyn Repository>,
        channel: Arc<dyn ChatChannel>,
        alarms: AlarmSettings,
        now: NaiveDateTime,
    ) -> Result<Self, StorageError> {
        let mut users = Users::new();
        let mut max_id: ItemId = 0;
        let mut item_count = 0;

        for mut user in repository.get_all_users().await? {
            let mut items = repository.get_user_items(user.id).await?;
            for item in &mut items {
                restore_alarm_count(item, now, &alarms);
                max_id = max_id.max(item.id);
            }

            item_count += items.len();
            user.extend_items(items);
            users.insert(user.chat_user_id, user);
        }

        let next_id = repository.get_item_counter().await?.max(max_id + 1);
        log::info!(
            "Loaded {} users with {} items, next item id {}",
            users.len(),
            item_count,
            next_id
        );

        Ok(Self::with_users(
            users,
            ItemIdGenerator::starting_at(next_id),
            repository,
            channel,
            alarms,
        ))
    }

    pub fn channel(&self) -> &Arc<dyn ChatChannel> {
        &self.channel
    }

    pub fn alarms(&self) -> &AlarmSettings {
        &self.alarms
    }

    pub async fn lock_users(&self) -> MutexGuard<'_, Users> {
        self.users.lock().await
    }

    /// Entry point for every inbound chat message. Text that is not a command
    /// is ignored; everything else gets exactly one reply.
    pub async fn handle_message(&self, message: InboundMessage) {
        if !message.text.trim_start().starts_with('!') {
            return;
        }

        match parser::parse_command(&message.text) {
            Ok(Some(command)) => self.handle_command(&message, command).await,
            Ok(None) => {}
            Err(error) => self.handle_error(&message, error).await,
        }
    }

    async fn handle_error(&self, message: &InboundMessage, error: ParserError) {
        log::debug!(
            "Could not parse {:?} from {}: {:?}",
            message.text,
            message.author,
            error
        );

        if let Err(e) = self.channel.send_text(message.channel, &error.to_string()).await {
            log::error!("Failed to send parse error to {}: {:?}", message.channel, e);
        }
    }

    async fn handle_command(&self, message: &InboundMessage, command: Command) {
        log::info!("Handling '{}' for {}", command.describe(), message.author);

        let mut users = self.users.lock().await;
        let user = match self.get_or_register(&mut users, message).await {
            Ok(user) => user,
            Err(e) => {
                log::error!("Failed to look up user {}: {:?}", message.author, e);
                return;
            }
        };

        let outcome = command.execute(user, &self.ids);
        let owner = user.id;

        let persisted = match &outcome.change {
            Some(ItemChange::Created(item)) => self.repository.insert_item(item, owner).await,
            Some(ItemChange::Removed(item)) => self.repository.delete_item(item.id).await,
            None => Ok(()),
        };
        if let Err(e) = persisted {
            log::error!("Failed to persist '{}': {:?}", command.describe(), e);
        }

        self.send(message.channel, &outcome.confirmation).await;
    }

    async fn get_or_register<'a>(
        &self,
        users: &'a mut Users,
        message: &InboundMessage,
    ) -> Result<&'a mut User, StorageError> {
        if !users.contains_key(&message.author) {
            let user = match self.repository.find_user(message.author).await? {
                Some(user) => user,
                None => {
                    log::info!("Registering user {} ({})", message.author, message.author_name);
                    self.repository
                        .insert_user(NewUser {
                            chat_user_id: message.author,
                            name: message.author_name.clone(),
                        })
                        .await?
                }
            };
            users.insert(message.author, user);
        }

        users
            .get_mut(&message.author)
            .ok_or(StorageError::UnknownUser(message.author))
    }

    /// Removes the acknowledged item from `chat_user`'s lists and from storage.
    pub async fn acknowledge_item(&self, chat_user: ChatUserId, item_id: ItemId) -> Option<Item> {
        let mut users = self.users.lock().await;

        let removed = users
            .get_mut(&chat_user)
            .and_then(|user| user.remove_by_id(item_id))
            // Alarms go to a shared channel, so anyone there may acknowledge.
            .or_else(|| users.values_mut().find_map(|user| user.remove_by_id(item_id)));

        let Some(item) = removed else {
            log::warn!("Acknowledged item {} does not exist", item_id);
            return None;
        };

        log::info!("Item {} acknowledged by {}", item_id, chat_user);
        if let Err(e) = self.repository.delete_item(item_id).await {
            log::error!("Failed to delete acknowledged item {}: {:?}", item_id, e);
        }

        Some(item)
    }

    async fn send(&self, channel: ChannelId, message: &StructuredMessage) {
        if let Err(e) = self.channel.send_structured_message(channel, message).await {
            log::error!("Failed to send '{}' to {}: {:?}", message.title, channel, e);
        }
    }
}
