//! Persistence for the quiz collection: the repository contract plus JSON
//! file, `SQLite`, and in-memory backends.

pub mod json;
pub mod repository;
pub mod sqlite;

pub use json::JsonFileRepository;
pub use repository::{InMemoryRepository, QuizRepository, Storage, StorageError};
pub use sqlite::SqliteRepository;
