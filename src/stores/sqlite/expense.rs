//! Implements a SQLite backed expense store.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, Transaction};
use time::OffsetDateTime;

use crate::{
    database_id::new_database_id,
    expense::{Expense, ExpenseId, NewExpense},
    stores::{
        ExpenseStore, StoreError,
        sqlite::{category::map_category_row_with_offset, lock, tag::map_tag_row_with_offset},
    },
    tag::{Tag, TagId},
};

const SELECT_EXPENSES: &str = "SELECT expense.id, expense.amount, expense.description, \
    expense.date, expense.created_at, category.id, category.name, category.created_at \
    FROM expense INNER JOIN category ON category.id = expense.category_id";

const SELECT_EXPENSE_TAGS: &str = "SELECT expense_tag.expense_id, tag.id, tag.name, \
    tag.created_at FROM expense_tag INNER JOIN tag ON tag.id = expense_tag.tag_id";

/// Creates, retrieves, updates and deletes expenses in a SQLite database.
///
/// Reads return each expense with its category and tags already attached.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new expense store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    fn create(&self, expense: NewExpense) -> Result<ExpenseId, StoreError> {
        let mut connection = lock(&self.connection)?;
        let transaction = connection.transaction()?;
        let id = new_database_id();

        transaction.execute(
            "INSERT INTO expense (id, amount, description, date, category_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                &id,
                expense.amount,
                &expense.description,
                expense.date,
                &expense.category_id,
                OffsetDateTime::now_utc(),
            ),
        )?;
        insert_expense_tags(&transaction, &id, &expense.tag_ids)?;
        transaction.commit()?;

        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Expense, StoreError> {
        let connection = lock(&self.connection)?;

        let mut tags: HashMap<ExpenseId, Vec<Tag>> = HashMap::new();
        for row in connection
            .prepare(&format!(
                "{SELECT_EXPENSE_TAGS} WHERE expense_tag.expense_id = ?1 ORDER BY tag.name, tag.id"
            ))?
            .query_map([id], map_expense_tag_row)?
        {
            let (expense_id, tag) = row?;
            tags.entry(expense_id).or_default().push(tag);
        }

        connection
            .prepare(&format!("{SELECT_EXPENSES} WHERE expense.id = ?1"))?
            .query_row([id], |row| map_expense_row(row, &mut tags))
            .map_err(StoreError::from)
    }

    fn get_all(&self) -> Result<Vec<Expense>, StoreError> {
        let connection = lock(&self.connection)?;

        let mut tags: HashMap<ExpenseId, Vec<Tag>> = HashMap::new();
        for row in connection
            .prepare(&format!("{SELECT_EXPENSE_TAGS} ORDER BY tag.name, tag.id"))?
            .query_map([], map_expense_tag_row)?
        {
            let (expense_id, tag) = row?;
            tags.entry(expense_id).or_default().push(tag);
        }

        connection
            .prepare(&format!(
                "{SELECT_EXPENSES} ORDER BY expense.date DESC, expense.created_at DESC, expense.rowid DESC"
            ))?
            .query_map([], |row| map_expense_row(row, &mut tags))?
            .map(|maybe_expense| maybe_expense.map_err(StoreError::from))
            .collect()
    }

    fn update(&self, id: &str, expense: NewExpense) -> Result<(), StoreError> {
        let mut connection = lock(&self.connection)?;
        let transaction = connection.transaction()?;

        let rows_affected = transaction.execute(
            "UPDATE expense SET amount = ?1, description = ?2, date = ?3, category_id = ?4
             WHERE id = ?5",
            (
                expense.amount,
                &expense.description,
                expense.date,
                &expense.category_id,
                id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        transaction.execute("DELETE FROM expense_tag WHERE expense_id = ?1", [id])?;
        insert_expense_tags(&transaction, id, &expense.tag_ids)?;
        transaction.commit()?;

        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let rows_affected =
            lock(&self.connection)?.execute("DELETE FROM expense WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

fn insert_expense_tags(
    transaction: &Transaction,
    expense_id: &str,
    tag_ids: &[TagId],
) -> Result<(), rusqlite::Error> {
    let mut statement =
        transaction.prepare("INSERT INTO expense_tag (expense_id, tag_id) VALUES (?1, ?2)")?;

    for tag_id in tag_ids {
        statement.execute((expense_id, tag_id))?;
    }

    Ok(())
}

/// Create the expense table and the table linking expenses to tags.
///
/// A category cannot be deleted while expenses refer to it. Deleting an
/// expense or a tag removes the links between them.
pub fn create_expense_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id TEXT PRIMARY KEY NOT NULL,
            amount INTEGER NOT NULL CHECK (amount > 0),
            description TEXT NOT NULL,
            date TEXT NOT NULL,
            category_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
        );

        CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);
        CREATE INDEX IF NOT EXISTS idx_expense_category_id ON expense(category_id);

        CREATE TABLE IF NOT EXISTS expense_tag (
            expense_id TEXT NOT NULL,
            tag_id TEXT NOT NULL,
            PRIMARY KEY (expense_id, tag_id),
            FOREIGN KEY(expense_id) REFERENCES expense(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(tag_id) REFERENCES tag(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_expense_tag_tag_id ON expense_tag(tag_id);",
    )
}

fn map_expense_tag_row(row: &Row) -> Result<(ExpenseId, Tag), rusqlite::Error> {
    Ok((row.get(0)?, map_tag_row_with_offset(row, 1)?))
}

fn map_expense_row(
    row: &Row,
    tags: &mut HashMap<ExpenseId, Vec<Tag>>,
) -> Result<Expense, rusqlite::Error> {
    let id: ExpenseId = row.get(0)?;
    let tags = tags.remove(&id).unwrap_or_default();

    Ok(Expense {
        amount: row.get(1)?,
        description: row.get(2)?,
        date: row.get(3)?,
        created_at: row.get(4)?,
        category: map_category_row_with_offset(row, 5)?,
        tags,
        id,
    })
}
