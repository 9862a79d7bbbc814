// src/infrastructure/repositories/mod.rs
mod sqlite_post;
mod sqlite_user;

pub use sqlite_post::{SqlitePostReadRepository, SqlitePostWriteRepository};
pub use sqlite_user::SqliteUserRepository;
