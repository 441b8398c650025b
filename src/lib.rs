pub mod app;
pub mod appsettings;
pub mod command;
pub mod delivery;
pub mod item;
pub mod parser;
pub mod scheduling;
pub mod storage;
pub mod telegram;
pub mod user;

#[cfg(test)]
mod test_utils;
