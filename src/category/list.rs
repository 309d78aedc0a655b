//! Categories listing page and JSON endpoint.

use axum::{
    Json,
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    category::{Category, list_categories},
    endpoints::{self, format_endpoint},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links,
    },
    navigation::NavBar,
    page_cache::{CachedView, PageCache},
    stores::sqlite::SQLiteCategoryStore,
};

/// The state needed for listing categories.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub category_store: SQLiteCategoryStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// Render the categories listing page, reusing the cached page if it is fresh.
pub async fn get_categories_page(State(state): State<CategoriesPageState>) -> Response {
    let page = state.page_cache.get_or_render(CachedView::Categories, || {
        list_categories(&state.category_store)
            .map(|categories| categories_view(&categories).into_string())
    });

    match page {
        Ok(page) => Html(page).into_response(),
        Err(error) => error.into_page_response(),
    }
}

/// Get every category as JSON, most recently created first.
pub async fn list_categories_endpoint(
    State(state): State<CategoriesPageState>,
) -> Result<Json<Vec<Category>>, Error> {
    list_categories(&state.category_store).map(Json)
}

fn categories_view(categories: &[Category]) -> Markup {
    let new_category_route = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |category: &Category| {
        let edit_url = format_endpoint(endpoints::EDIT_CATEGORY_VIEW, &category.id);
        let delete_url = format_endpoint(endpoints::CATEGORY, &category.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? Categories with expenses cannot be deleted.",
            category.name
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (category.name) }

                td class=(TABLE_CELL_STYLE) { (category.created_at.date()) }

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
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(new_category_route) class=(LINK_STYLE)
                    {
                        "Create Category"
                    }
                }

                table class="w-full text-sm text-left rtl:text-right
                    text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Created" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for category in categories {
                            (table_row(category))
                        }

                        @if categories.is_empty() {
                            tr
                            {
                                td
                                    colspan="3"
                                    class="px-6 py-4 text-center
                                        text-gray-500 dark:text-gray-400"
                                {
                                    "No categories created yet. "
                                    a href=(new_category_route) class=(LINK_STYLE)
                                    {
                                        "Create your first category"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &content)
}
