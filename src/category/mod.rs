//! Categories, the mandatory grouping for every expense.

mod create;
mod delete;
mod domain;
mod edit;
mod list;
mod operations;

pub use create::{create_category_endpoint, get_new_category_page};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, CategoryName};
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::{get_categories_page, list_categories_endpoint};
pub use operations::{create_category, delete_category, list_categories, update_category};
