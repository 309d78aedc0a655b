//! Contains traits and implementations for objects that store the domain models.
//!
//! The mutation pipeline only ever talks to these traits, so any backend (or a
//! test double) can stand in for the SQLite implementations in [sqlite].

pub mod sqlite;

use crate::{
    category::{Category, CategoryName},
    expense::{Expense, ExpenseId, NewExpense},
    tag::{Tag, TagName},
};

/// Errors originating from operations on the datastore.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    /// No record exists with the given ID.
    #[error("the requested record could not be found")]
    NotFound,

    /// A write referred to a record that does not exist, or a delete would
    /// leave other records pointing at nothing.
    #[error("a foreign key constraint failed")]
    ForeignKeyViolation,

    /// The lock guarding the database connection was poisoned.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    Sql(rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => StoreError::ForeignKeyViolation,
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            error => StoreError::Sql(error),
        }
    }
}

/// Creates, retrieves, updates and deletes expense categories.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    fn create(&self, name: CategoryName) -> Result<Category, StoreError>;

    /// Get a category by its ID.
    fn get(&self, id: &str) -> Result<Category, StoreError>;

    /// Get all categories, most recently created first.
    fn get_all(&self) -> Result<Vec<Category>, StoreError>;

    /// Replace the name of the category with `id`.
    ///
    /// Returns [StoreError::NotFound] if there is no such category.
    fn update(&self, id: &str, name: CategoryName) -> Result<(), StoreError>;

    /// Delete the category with `id`.
    ///
    /// Returns [StoreError::NotFound] if there is no such category, or
    /// [StoreError::ForeignKeyViolation] if expenses still use it.
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Creates, retrieves, updates and deletes expense tags.
pub trait TagStore {
    /// Create a new tag and add it to the store.
    fn create(&self, name: TagName) -> Result<Tag, StoreError>;

    /// Get a tag by its ID.
    fn get(&self, id: &str) -> Result<Tag, StoreError>;

    /// Get all tags, most recently created first.
    fn get_all(&self) -> Result<Vec<Tag>, StoreError>;

    /// Replace the name of the tag with `id`.
    ///
    /// Returns [StoreError::NotFound] if there is no such tag.
    fn update(&self, id: &str, name: TagName) -> Result<(), StoreError>;

    /// Delete the tag with `id`, removing it from any expenses that use it.
    ///
    /// Returns [StoreError::NotFound] if there is no such tag.
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Creates, retrieves, updates and deletes expenses along with their tag
/// associations.
pub trait ExpenseStore {
    /// Insert an expense and connect it to its tags.
    ///
    /// Returns [StoreError::ForeignKeyViolation] if the category or any of
    /// the tags do not exist, in which case nothing is written.
    fn create(&self, expense: NewExpense) -> Result<ExpenseId, StoreError>;

    /// Get an expense with its category and tags.
    fn get(&self, id: &str) -> Result<Expense, StoreError>;

    /// Get all expenses with their category and tags, latest date first.
    fn get_all(&self) -> Result<Vec<Expense>, StoreError>;

    /// Replace every field of the expense with `id`, including its tag set.
    ///
    /// Returns [StoreError::NotFound] if there is no such expense.
    fn update(&self, id: &str, expense: NewExpense) -> Result<(), StoreError>;

    /// Delete the expense with `id`.
    ///
    /// Returns [StoreError::NotFound] if there is no such expense.
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod store_error_tests {
    use rusqlite::Connection;

    use super::StoreError;

    #[test]
    fn maps_foreign_key_failures() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute_batch(
                "PRAGMA foreign_keys = ON;
                CREATE TABLE parent (id TEXT PRIMARY KEY);
                CREATE TABLE child (parent_id TEXT NOT NULL REFERENCES parent(id));",
            )
            .unwrap();

        let error = connection
            .execute("INSERT INTO child (parent_id) VALUES ('missing')", ())
            .unwrap_err();

        assert_eq!(StoreError::from(error), StoreError::ForeignKeyViolation);
    }

    #[test]
    fn maps_no_rows_to_not_found() {
        assert_eq!(
            StoreError::from(rusqlite::Error::QueryReturnedNoRows),
            StoreError::NotFound
        );
    }
}
