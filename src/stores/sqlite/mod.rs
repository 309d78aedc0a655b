//! SQLite implementations of the store traits.
//!
//! All three stores share one connection behind a mutex, so every store call
//! is serialised.

pub mod category;
pub mod expense;
pub mod tag;

use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

pub use category::SQLiteCategoryStore;
pub use expense::SQLiteExpenseStore;
pub use tag::SQLiteTagStore;

use crate::stores::StoreError;

/// Acquire the shared connection.
pub(crate) fn lock(
    connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, StoreError> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        StoreError::DatabaseLock
    })
}
