#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    DEFAULT_SCOPE, InMemorySessionStorage, SessionStorage, Storage, StorageError, TOKEN_KEY,
};
