//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::stores::sqlite::{
    category::create_category_table, expense::create_expense_tables, tag::create_tag_table,
};

/// Enable foreign key enforcement on `connection` and create any missing
/// tables.
///
/// Foreign keys are a per-connection setting in SQLite, so this must be
/// called on every connection the stores will use.
///
/// # Errors
///
/// Returns an error if the pragma or any of the table definitions fail, in
/// which case no tables are created.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_tag_table(&transaction)?;
    create_expense_tables(&transaction)?;

    transaction.commit()
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_every_table() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        let tables: Vec<String> = connection
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(tables, ["category", "expense", "expense_tag", "tag"]);
    }

    #[test]
    fn enables_foreign_keys() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        let enabled: bool = connection
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert!(enabled);
    }

    #[test]
    fn can_run_twice() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        assert_eq!(initialize(&connection), Ok(()));
    }
}
