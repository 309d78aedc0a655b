//! Tag creation page and endpoint.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    form::RawForm,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        form_error_message,
    },
    navigation::NavBar,
    page_cache::PageCache,
    stores::sqlite::SQLiteTagStore,
    tag::create_tag,
};

/// The state needed for creating a tag.
#[derive(Debug, Clone)]
pub struct CreateTagEndpointState {
    pub tag_store: SQLiteTagStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for CreateTagEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tag_store: state.tag_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// Renders the new tag page.
pub async fn get_new_tag_page() -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_TAG_VIEW).into_html();
    let form = new_tag_form_view("", "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Tag", &content).into_response()
}

/// A route handler for creating a new tag.
///
/// On success the client is redirected to the tags page. Invalid names
/// re-render the form with the error.
pub async fn create_tag_endpoint(
    State(state): State<CreateTagEndpointState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let form = RawForm::from(fields);

    match create_tag(&form, &state.tag_store, &state.page_cache) {
        Ok(()) => (
            HxRedirect(endpoints::TAGS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::Validation(message)) => {
            new_tag_form_view(form.text("name"), &message).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

fn new_tag_form_view(name: &str, error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::TAGS_API)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "New Tag" }

            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Tag Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="e.g. holiday"
                    value=(name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Tag" }
        }
    }
}
