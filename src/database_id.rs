//! Database ID type definition.

use uuid::Uuid;

/// Alias for the string type used for mapping to database IDs.
pub type DatabaseId = String;

/// Generate a fresh, random ID for a new record.
pub fn new_database_id() -> DatabaseId {
    Uuid::new_v4().to_string()
}
