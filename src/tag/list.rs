//! Tags listing page and JSON endpoint.

use axum::{
    Json,
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        TAG_BADGE_STYLE, base, edit_delete_action_links,
    },
    navigation::NavBar,
    page_cache::{CachedView, PageCache},
    stores::sqlite::SQLiteTagStore,
    tag::{Tag, list_tags},
};

#[derive(Debug, Clone)]
pub struct TagsPageState {
    pub tag_store: SQLiteTagStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for TagsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tag_store: state.tag_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// Route handler for the tags listing page.
pub async fn get_tags_page(State(state): State<TagsPageState>) -> Response {
    let page = state.page_cache.get_or_render(CachedView::Tags, || {
        list_tags(&state.tag_store).map(|tags| tags_view(&tags).into_string())
    });

    match page {
        Ok(page) => Html(page).into_response(),
        Err(error) => error.into_page_response(),
    }
}

/// Get every tag as JSON, most recently created first.
pub async fn list_tags_endpoint(
    State(state): State<TagsPageState>,
) -> Result<Json<Vec<Tag>>, Error> {
    list_tags(&state.tag_store).map(Json)
}

fn tags_view(tags: &[Tag]) -> Markup {
    let new_tag_route = endpoints::NEW_TAG_VIEW;
    let nav_bar = NavBar::new(endpoints::TAGS_VIEW).into_html();

    let table_row = |tag: &Tag| {
        let edit_url = format_endpoint(endpoints::EDIT_TAG_VIEW, &tag.id);
        let delete_url = format_endpoint(endpoints::TAG, &tag.id);
        let confirm_message = format!(
            "Are you sure you want to delete the tag '{}'? It will be removed from all expenses.",
            tag.name
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(TAG_BADGE_STYLE) { (tag.name) }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &edit_url,
                            &delete_url,
                            &confirm_message,
                            "closest tr",
                            "delete",
                        ))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 lg:max-w-5xl lg:w-full"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Tags" }

                    a href=(new_tag_route) class=(LINK_STYLE) { "Create Tag" }
                }

                table class="w-full text-sm text-left rtl:text-right
                    text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Tag" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for tag in tags {
                            (table_row(tag))
                        }

                        @if tags.is_empty() {
                            tr
                            {
                                td
                                    colspan="2"
                                    class="px-6 py-4 text-center
                                        text-gray-500 dark:text-gray-400"
                                {
                                    "No tags created yet. "
                                    a href=(new_tag_route) class=(LINK_STYLE)
                                    {
                                        "Create your first tag"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Tags", &content)
}
