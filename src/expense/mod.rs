//! Expenses, the money spent that categories and tags describe.

mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod list;
mod operations;

pub use create::{create_expense_endpoint, get_new_expense_page};
pub use delete::delete_expense_endpoint;
pub use domain::{Expense, ExpenseId, NewExpense};
pub use edit::{get_edit_expense_page, update_expense_endpoint};
pub use list::{get_expenses_page, list_expenses_endpoint};
pub use operations::{create_expense, delete_expense, list_expenses, update_expense};
