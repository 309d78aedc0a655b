//! Category deletion endpoint.

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    alert::Alert,
    category::{CategoryId, delete_category},
    page_cache::PageCache,
    stores::sqlite::SQLiteCategoryStore,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryEndpointState {
    pub category_store: SQLiteCategoryStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for DeleteCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// Handle category deletion. Returns success alert or error.
///
/// Categories that still have expenses are not deleted.
pub async fn delete_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<DeleteCategoryEndpointState>,
) -> Response {
    match delete_category(&category_id, &state.category_store, &state.page_cache) {
        Ok(()) => Alert::SuccessSimple {
            message: "Category deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
