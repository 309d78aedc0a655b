//! The create, update, delete and list operations for expenses.
//!
//! Each mutation validates the form, makes one call to the store and, only on
//! success, invalidates the cached expense page. Creating or updating an
//! expense writes its tag set in the same store call.

use crate::{
    Error,
    expense::{Expense, NewExpense},
    form::{FieldErrors, RawForm, required_text},
    page_cache::{CachedView, InvalidateView},
    stores::ExpenseStore,
};

const EXPENSE_ID_REQUIRED: &str = "Expense ID is required";

/// Create an expense from the `amount`, `description`, `date`, `categoryId`
/// and repeated `tags` fields of `form`.
///
/// # Errors
///
/// Returns an [Error::Validation] listing every invalid field, or an
/// [Error::Persistence] if the category or a tag does not exist or the store
/// fails.
pub fn create_expense(
    form: &RawForm,
    store: &impl ExpenseStore,
    views: &impl InvalidateView,
) -> Result<(), Error> {
    let expense = NewExpense::from_form(form).map_err(FieldErrors::into_error)?;

    store
        .create(expense)
        .map_err(|error| Error::persistence("Failed to create expense", error))?;

    views.invalidate(CachedView::Expenses);

    Ok(())
}

/// Replace every field of the expense identified by the `id` field of
/// `form`. The submitted tags become the expense's complete tag set, so
/// submitting no tags removes them all.
///
/// # Errors
///
/// Returns an [Error::Validation] listing every invalid field, or an
/// [Error::Persistence] if the expense, its category or a tag does not exist
/// or the store fails.
pub fn update_expense(
    form: &RawForm,
    store: &impl ExpenseStore,
    views: &impl InvalidateView,
) -> Result<(), Error> {
    let mut errors = FieldErrors::default();
    let id = errors.check(required_text(form.text("id"), EXPENSE_ID_REQUIRED));
    let expense = NewExpense::parse(form, &mut errors);

    let (Some(id), Some(expense)) = (id, expense) else {
        return Err(errors.into_error());
    };

    store
        .update(&id, expense)
        .map_err(|error| Error::persistence("Failed to update expense", error))?;

    views.invalidate(CachedView::Expenses);

    Ok(())
}

/// Delete the expense with `id` along with its tag associations.
///
/// # Errors
///
/// Returns an [Error::Validation] if `id` is empty, or an
/// [Error::Persistence] if the expense does not exist or the store fails.
pub fn delete_expense(
    id: &str,
    store: &impl ExpenseStore,
    views: &impl InvalidateView,
) -> Result<(), Error> {
    if id.is_empty() {
        return Err(Error::Validation(EXPENSE_ID_REQUIRED.to_owned()));
    }

    store
        .delete(id)
        .map_err(|error| Error::persistence("Failed to delete expense", error))?;

    views.invalidate(CachedView::Expenses);

    Ok(())
}

/// Get every expense with its category and tags, latest date first.
///
/// # Errors
///
/// Returns an [Error::Persistence] if the store fails.
pub fn list_expenses(store: &impl ExpenseStore) -> Result<Vec<Expense>, Error> {
    store
        .get_all()
        .map_err(|error| Error::persistence("Failed to load expenses", error))
}
