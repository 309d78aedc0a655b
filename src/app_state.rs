//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    db::initialize,
    page_cache::PageCache,
    stores::sqlite::{SQLiteCategoryStore, SQLiteExpenseStore, SQLiteTagStore},
};

/// The state of the REST server.
///
/// Handlers take the parts they need through `FromRef` sub-states.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store for categories.
    pub category_store: SQLiteCategoryStore,

    /// The store for tags.
    pub tag_store: SQLiteTagStore,

    /// The store for expenses and their tag associations.
    pub expense_store: SQLiteExpenseStore,

    /// The rendered list pages.
    pub page_cache: PageCache,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, rusqlite::Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            category_store: SQLiteCategoryStore::new(connection.clone()),
            tag_store: SQLiteTagStore::new(connection.clone()),
            expense_store: SQLiteExpenseStore::new(connection),
            page_cache: PageCache::new(),
        })
    }
}
