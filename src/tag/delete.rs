use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    alert::Alert,
    page_cache::PageCache,
    stores::sqlite::SQLiteTagStore,
    tag::{TagId, delete_tag},
};

#[derive(Debug, Clone)]
pub struct DeleteTagEndpointState {
    pub tag_store: SQLiteTagStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for DeleteTagEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tag_store: state.tag_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// A route handler for deleting a tag. Expenses that had the tag keep
/// everything else.
pub async fn delete_tag_endpoint(
    Path(tag_id): Path<TagId>,
    State(state): State<DeleteTagEndpointState>,
) -> Response {
    match delete_tag(&tag_id, &state.tag_store, &state.page_cache) {
        Ok(()) => Alert::SuccessSimple {
            message: "Tag deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
