use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct TelegramSettings {
    pub token: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NotificationSettings {
    /// Chat that receives due-date alarms.
    pub channel_id: i64,
}

/// Minutes before the due time at which the first and second alarms fire, and
/// the interval between nags once an item is overdue.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct AlarmSettings {
    pub first_minutes: i64,
    pub second_minutes: i64,
    pub repeat_minutes: i64,
}

impl Default for AlarmSettings {
    fn default() -> Self {
        Self {
            first_minutes: 120,
            second_minutes: 30,
            repeat_minutes: 10,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StorageSettings {
    pub database_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://remindme.db".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    pub telegram: TelegramSettings,
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub alarms: AlarmSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

impl AppSettings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("appsettings").required(true))
                .add_source(File::with_name("appsettings.local").required(false)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings = builder
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
