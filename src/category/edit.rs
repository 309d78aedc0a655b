//! Category editing page and endpoint.

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    category::{CategoryId, update_category},
    endpoints::{self, format_endpoint},
    form::RawForm,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        form_error_message,
    },
    navigation::NavBar,
    page_cache::PageCache,
    stores::{CategoryStore, StoreError, sqlite::SQLiteCategoryStore},
};

/// The state needed for the edit category page.
#[derive(Debug, Clone)]
pub struct EditCategoryPageState {
    pub category_store: SQLiteCategoryStore,
}

impl FromRef<AppState> for EditCategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
        }
    }
}

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryEndpointState {
    pub category_store: SQLiteCategoryStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for UpdateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// Render the category editing page.
pub async fn get_edit_category_page(
    Path(category_id): Path<CategoryId>,
    State(state): State<EditCategoryPageState>,
) -> Response {
    let edit_endpoint = format_endpoint(endpoints::EDIT_CATEGORY_VIEW, &category_id);
    let update_endpoint = format_endpoint(endpoints::CATEGORY, &category_id);

    let (name, error_message) = match state.category_store.get(&category_id) {
        Ok(category) => (category.name.to_string(), ""),
        Err(StoreError::NotFound) => (String::new(), "Category not found"),
        Err(error) => {
            tracing::error!("Failed to retrieve category {category_id}: {error}");
            (String::new(), "Failed to load category")
        }
    };

    edit_category_view(&edit_endpoint, &update_endpoint, &name, error_message).into_response()
}

/// Handle category update form submission.
///
/// The category ID comes from the path, not the form body.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<UpdateCategoryEndpointState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let mut form = RawForm::from(fields);
    form.set("id", &category_id);

    match update_category(&form, &state.category_store, &state.page_cache) {
        Ok(()) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::Validation(message)) => {
            let update_endpoint = format_endpoint(endpoints::CATEGORY, &category_id);
            edit_category_form_view(&update_endpoint, form.text("name"), &message).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

fn edit_category_view(
    edit_endpoint: &str,
    update_endpoint: &str,
    name: &str,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = edit_category_form_view(update_endpoint, name, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Category", &content)
}

fn edit_category_form_view(update_endpoint: &str, name: &str, error_message: &str) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Edit Category" }

            div
            {
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Category Name"
                }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="e.g. Groceries"
                    value=(name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Category" }
        }
    }
}
