//! Implements a SQLite backed tag store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    tag::{Tag, TagName},
    database_id::new_database_id,
    stores::{TagStore, StoreError, sqlite::lock},
};

/// Creates, retrieves, updates and deletes tags in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTagStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTagStore {
    /// Create a new tag store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TagStore for SQLiteTagStore {
    fn create(&self, name: TagName) -> Result<Tag, StoreError> {
        lock(&self.connection)?
            .prepare(
                "INSERT INTO tag (id, name, created_at) VALUES (?1, ?2, ?3)
                 RETURNING id, name, created_at",
            )?
            .query_row(
                (new_database_id(), name.as_ref(), OffsetDateTime::now_utc()),
                map_row,
            )
            .map_err(StoreError::from)
    }

    fn get(&self, id: &str) -> Result<Tag, StoreError> {
        lock(&self.connection)?
            .prepare("SELECT id, name, created_at FROM tag WHERE id = ?1")?
            .query_row([id], map_row)
            .map_err(StoreError::from)
    }

    fn get_all(&self) -> Result<Vec<Tag>, StoreError> {
        lock(&self.connection)?
            .prepare(
                "SELECT id, name, created_at FROM tag ORDER BY created_at DESC, rowid DESC",
            )?
            .query_map([], map_row)?
            .map(|maybe_tag| maybe_tag.map_err(StoreError::from))
            .collect()
    }

    fn update(&self, id: &str, name: TagName) -> Result<(), StoreError> {
        let rows_affected = lock(&self.connection)?.execute(
            "UPDATE tag SET name = ?1 WHERE id = ?2",
            (name.as_ref(), id),
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let rows_affected =
            lock(&self.connection)?.execute("DELETE FROM tag WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

/// Create the tag table.
pub fn create_tag_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS tag (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tag_created_at ON tag(created_at);",
    )
}

/// Map a row of `id, name, created_at` starting at column `offset`.
pub(crate) fn map_tag_row_with_offset(
    row: &Row,
    offset: usize,
) -> Result<Tag, rusqlite::Error> {
    let id = row.get(offset)?;
    let raw_name: String = row.get(offset + 1)?;
    let created_at = row.get(offset + 2)?;

    Ok(Tag {
        id,
        name: TagName::new_unchecked(&raw_name),
        created_at,
    })
}

fn map_row(row: &Row) -> Result<Tag, rusqlite::Error> {
    map_tag_row_with_offset(row, 0)
}
