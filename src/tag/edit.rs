//! Tag editing page and endpoint.

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
    endpoints::{self, format_endpoint},
    form::RawForm,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        form_error_message,
    },
    navigation::NavBar,
    page_cache::PageCache,
    stores::{StoreError, TagStore, sqlite::SQLiteTagStore},
    tag::{TagId, update_tag},
};

#[derive(Debug, Clone)]
pub struct EditTagPageState {
    pub tag_store: SQLiteTagStore,
}

impl FromRef<AppState> for EditTagPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tag_store: state.tag_store.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTagEndpointState {
    pub tag_store: SQLiteTagStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for UpdateTagEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tag_store: state.tag_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// Renders the edit tag page, pre-filled with the tag's current name.
pub async fn get_edit_tag_page(
    Path(tag_id): Path<TagId>,
    State(state): State<EditTagPageState>,
) -> Response {
    let edit_endpoint = format_endpoint(endpoints::EDIT_TAG_VIEW, &tag_id);
    let update_endpoint = format_endpoint(endpoints::TAG, &tag_id);

    let (name, error_message) = match state.tag_store.get(&tag_id) {
        Ok(tag) => (tag.name.to_string(), ""),
        Err(StoreError::NotFound) => (String::new(), "Tag not found"),
        Err(error) => {
            tracing::error!("Failed to retrieve tag {tag_id}: {error}");
            (String::new(), "Failed to load tag")
        }
    };

    let nav_bar = NavBar::new(&edit_endpoint).into_html();
    let form = edit_tag_form_view(&update_endpoint, &name, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Tag", &content).into_response()
}

/// A route handler for renaming a tag. The tag ID is taken from the path.
pub async fn update_tag_endpoint(
    Path(tag_id): Path<TagId>,
    State(state): State<UpdateTagEndpointState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let mut form = RawForm::from(fields);
    form.set("id", &tag_id);

    match update_tag(&form, &state.tag_store, &state.page_cache) {
        Ok(()) => (
            HxRedirect(endpoints::TAGS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::Validation(message)) => {
            let update_endpoint = format_endpoint(endpoints::TAG, &tag_id);
            edit_tag_form_view(&update_endpoint, form.text("name"), &message).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

fn edit_tag_form_view(update_endpoint: &str, name: &str, error_message: &str) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Edit Tag" }

            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Tag Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    value=(name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Tag" }
        }
    }
}


#[cfg(test)]
mod update_tag_endpoint_tests {
    use axum::{
        Form,
        extract::{FromRef, Path, State},
        http::StatusCode,
    };

    use crate::{
        endpoints,
        page_cache::CachedView,
        stores::TagStore,
        tag::{TagName, update_tag_endpoint},
        test_utils::{
            assert_form_error_message, assert_hx_redirect, get_test_app_state, must_get_form,
            parse_html_fragment, test_form,
        },
    };

    use super::UpdateTagEndpointState;

    #[tokio::test]
    async fn can_rename_tag() {
        let state = UpdateTagEndpointState::from_ref(&get_test_app_state());
        let tag = state.tag_store.create(TagName::new_unchecked("wrok")).unwrap();
        state.page_cache.insert(CachedView::Tags, "stale".to_owned());

        let response = update_tag_endpoint(
            Path(tag.id.clone()),
            State(state.clone()),
            Form(test_form(&[("name", "work")])),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::TAGS_VIEW);
        assert_eq!(state.tag_store.get(&tag.id).unwrap().name.as_ref(), "work");
        assert_eq!(state.page_cache.get(CachedView::Tags), None);
    }

    #[tokio::test]
    async fn blank_name_renders_form_with_error() {
        let state = UpdateTagEndpointState::from_ref(&get_test_app_state());
        let tag = state.tag_store.create(TagName::new_unchecked("work")).unwrap();

        let response = update_tag_endpoint(
            Path(tag.id.clone()),
            State(state.clone()),
            Form(test_form(&[("name", " ")])),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_form_error_message(
            &must_get_form(&html),
            "Validation failed: Tag name is required",
        );
        assert_eq!(state.tag_store.get(&tag.id).unwrap().name.as_ref(), "work");
    }

    #[tokio::test]
    async fn unknown_tag_returns_error_alert() {
        let state = UpdateTagEndpointState::from_ref(&get_test_app_state());

        let response = update_tag_endpoint(
            Path("missing".to_owned()),
            State(state),
            Form(test_form(&[("name", "work")])),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
