//! The create, update, delete and list operations for tags.
//!
//! Each mutation validates the form, makes one call to the store and, only on
//! success, invalidates the cached tag page.

use crate::{
    Error,
    form::{FieldErrors, RawForm, required_text},
    page_cache::{CachedView, InvalidateView},
    stores::TagStore,
    tag::{Tag, TagName},
};

const TAG_ID_REQUIRED: &str = "Tag ID is required";

/// Create a tag from the `name` field of `form`.
pub fn create_tag(
    form: &RawForm,
    store: &impl TagStore,
    views: &impl InvalidateView,
) -> Result<(), Error> {
    let name = parse_name(form)?;

    store
        .create(name)
        .map_err(|error| Error::persistence("Failed to create tag", error))?;

    views.invalidate(CachedView::Tags);

    Ok(())
}

/// Replace the name of the tag identified by the `id` field of `form`.
pub fn update_tag(
    form: &RawForm,
    store: &impl TagStore,
    views: &impl InvalidateView,
) -> Result<(), Error> {
    let mut errors = FieldErrors::default();
    let id = errors.check(required_text(form.text("id"), TAG_ID_REQUIRED));
    let name = errors.check(TagName::new(form.text("name")));

    let (Some(id), Some(name)) = (id, name) else {
        return Err(errors.into_error());
    };

    store
        .update(&id, name)
        .map_err(|error| Error::persistence("Failed to update tag", error))?;

    views.invalidate(CachedView::Tags);

    Ok(())
}

/// Delete the tag with `id`. Expenses using the tag simply lose it.
pub fn delete_tag(
    id: &str,
    store: &impl TagStore,
    views: &impl InvalidateView,
) -> Result<(), Error> {
    if id.is_empty() {
        return Err(Error::Validation(TAG_ID_REQUIRED.to_owned()));
    }

    store
        .delete(id)
        .map_err(|error| Error::persistence("Failed to delete tag", error))?;

    views.invalidate(CachedView::Tags);

    Ok(())
}

/// Get every tag, most recently created first.
pub fn list_tags(store: &impl TagStore) -> Result<Vec<Tag>, Error> {
    store
        .get_all()
        .map_err(|error| Error::persistence("Failed to load tags", error))
}

fn parse_name(form: &RawForm) -> Result<TagName, Error> {
    let mut errors = FieldErrors::default();

    match errors.check(TagName::new(form.text("name"))) {
        Some(name) => Ok(name),
        None => Err(errors.into_error()),
    }
}
