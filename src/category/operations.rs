//! The create, update, delete and list operations for categories.
//!
//! Each mutation validates the form, makes one call to the store and, only on
//! success, invalidates the cached category page.

use crate::{
    Error,
    category::{Category, CategoryName},
    form::{FieldErrors, RawForm, required_text},
    page_cache::{CachedView, InvalidateView},
    stores::CategoryStore,
};

const CATEGORY_ID_REQUIRED: &str = "Category ID is required";

/// Create a category from the `name` field of `form`.
///
/// # Errors
///
/// Returns an [Error::Validation] if the name is missing or blank, or an
/// [Error::Persistence] if the store rejects the insert.
pub fn create_category(
    form: &RawForm,
    store: &impl CategoryStore,
    views: &impl InvalidateView,
) -> Result<(), Error> {
    let name = parse_name(form)?;

    store
        .create(name)
        .map_err(|error| Error::persistence("Failed to create category", error))?;

    views.invalidate(CachedView::Categories);

    Ok(())
}

/// Replace the name of the category identified by the `id` field of `form`.
///
/// # Errors
///
/// Returns an [Error::Validation] if the ID or name is missing or blank, or
/// an [Error::Persistence] if the category does not exist or the store fails.
pub fn update_category(
    form: &RawForm,
    store: &impl CategoryStore,
    views: &impl InvalidateView,
) -> Result<(), Error> {
    let mut errors = FieldErrors::default();
    let id = errors.check(required_text(form.text("id"), CATEGORY_ID_REQUIRED));
    let name = errors.check(CategoryName::new(form.text("name")));

    let (Some(id), Some(name)) = (id, name) else {
        return Err(errors.into_error());
    };

    store
        .update(&id, name)
        .map_err(|error| Error::persistence("Failed to update category", error))?;

    views.invalidate(CachedView::Categories);

    Ok(())
}

/// Delete the category with `id`.
///
/// # Errors
///
/// Returns an [Error::Validation] if `id` is empty, or an
/// [Error::Persistence] if the category does not exist or expenses still
/// belong to it.
pub fn delete_category(
    id: &str,
    store: &impl CategoryStore,
    views: &impl InvalidateView,
) -> Result<(), Error> {
    if id.is_empty() {
        return Err(Error::Validation(CATEGORY_ID_REQUIRED.to_owned()));
    }

    store
        .delete(id)
        .map_err(|error| Error::persistence("Failed to delete category", error))?;

    views.invalidate(CachedView::Categories);

    Ok(())
}

/// Get every category, most recently created first.
///
/// # Errors
///
/// Returns an [Error::Persistence] if the store fails.
pub fn list_categories(store: &impl CategoryStore) -> Result<Vec<Category>, Error> {
    store
        .get_all()
        .map_err(|error| Error::persistence("Failed to load categories", error))
}

fn parse_name(form: &RawForm) -> Result<CategoryName, Error> {
    let mut errors = FieldErrors::default();

    match errors.check(CategoryName::new(form.text("name"))) {
        Some(name) => Ok(name),
        None => Err(errors.into_error()),
    }
}
