//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    category::{Category, CategoryName},
    database_id::new_database_id,
    stores::{CategoryStore, StoreError, sqlite::lock},
};

/// Creates, retrieves, updates and deletes categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    fn create(&self, name: CategoryName) -> Result<Category, StoreError> {
        lock(&self.connection)?
            .prepare(
                "INSERT INTO category (id, name, created_at) VALUES (?1, ?2, ?3)
                 RETURNING id, name, created_at",
            )?
            .query_row(
                (new_database_id(), name.as_ref(), OffsetDateTime::now_utc()),
                map_row,
            )
            .map_err(StoreError::from)
    }

    fn get(&self, id: &str) -> Result<Category, StoreError> {
        lock(&self.connection)?
            .prepare("SELECT id, name, created_at FROM category WHERE id = ?1")?
            .query_row([id], map_row)
            .map_err(StoreError::from)
    }

    fn get_all(&self) -> Result<Vec<Category>, StoreError> {
        lock(&self.connection)?
            .prepare(
                "SELECT id, name, created_at FROM category ORDER BY created_at DESC, rowid DESC",
            )?
            .query_map([], map_row)?
            .map(|maybe_category| maybe_category.map_err(StoreError::from))
            .collect()
    }

    fn update(&self, id: &str, name: CategoryName) -> Result<(), StoreError> {
        let rows_affected = lock(&self.connection)?.execute(
            "UPDATE category SET name = ?1 WHERE id = ?2",
            (name.as_ref(), id),
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let rows_affected =
            lock(&self.connection)?.execute("DELETE FROM category WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

/// Create the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_created_at ON category(created_at);",
    )
}

/// Map a row of `id, name, created_at` starting at column `offset`.
pub(crate) fn map_category_row_with_offset(
    row: &Row,
    offset: usize,
) -> Result<Category, rusqlite::Error> {
    let id = row.get(offset)?;
    let raw_name: String = row.get(offset + 1)?;
    let created_at = row.get(offset + 2)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        created_at,
    })
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    map_category_row_with_offset(row, 0)
}
