mod in_memory;
mod repository;
pub mod sqlite;

pub use in_memory::InMemoryRepository;
pub use repository::{NewUser, Repository, StorageError};
