//! Expenses listing page and JSON endpoint.

use axum::{
    Json,
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    expense::{Expense, list_expenses},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        TAG_BADGE_STYLE, base, edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
    page_cache::{CachedView, PageCache},
    stores::sqlite::SQLiteExpenseStore,
};

/// Shown in place of the total when it does not fit in an `i64`.
const TOTAL_TOO_LARGE: &str = "Too large to show";

#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    pub expense_store: SQLiteExpenseStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// Route handler for the expenses listing page.
///
/// The page shows category and tag names, so it is served from the cache
/// until an expense, category or tag changes.
pub async fn get_expenses_page(State(state): State<ExpensesPageState>) -> Response {
    let page = state.page_cache.get_or_render(CachedView::Expenses, || {
        list_expenses(&state.expense_store).map(|expenses| expenses_view(&expenses).into_string())
    });

    match page {
        Ok(page) => Html(page).into_response(),
        Err(error) => error.into_page_response(),
    }
}

/// Get every expense with its category and tags as JSON, latest date first.
pub async fn list_expenses_endpoint(
    State(state): State<ExpensesPageState>,
) -> Result<Json<Vec<Expense>>, Error> {
    list_expenses(&state.expense_store).map(Json)
}

fn expenses_view(expenses: &[Expense]) -> Markup {
    let new_expense_route = endpoints::NEW_EXPENSE_VIEW;
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();
    let total = expenses
        .iter()
        .try_fold(0_i64, |total, expense| total.checked_add(expense.amount));

    let table_row = |expense: &Expense| {
        let edit_url = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, &expense.id);
        let delete_url = format_endpoint(endpoints::EXPENSE, &expense.id);
        let confirm_message = format!(
            "Are you sure you want to delete the expense '{}'?",
            expense.description
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (expense.date) }

                td class=(TABLE_CELL_STYLE) { (expense.description) }

                td class=(TABLE_CELL_STYLE) { (expense.category.name) }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex flex-wrap gap-1"
                    {
                        @for tag in &expense.tags {
                            span class=(TAG_BADGE_STYLE) { (tag.name) }
                        }
                    }
                }

                td class={ (TABLE_CELL_STYLE) " text-right" }
                {
                    (format_currency(expense.amount))
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
                    h1 class="text-xl font-bold" { "Expenses" }

                    a href=(new_expense_route) class=(LINK_STYLE) { "Record Expense" }
                }

                table class="w-full text-sm text-left rtl:text-right
                    text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Tags" }
                            th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for expense in expenses {
                            (table_row(expense))
                        }

                        @if expenses.is_empty() {
                            tr
                            {
                                td
                                    colspan="6"
                                    class="px-6 py-4 text-center
                                        text-gray-500 dark:text-gray-400"
                                {
                                    "No expenses recorded yet. "
                                    a href=(new_expense_route) class=(LINK_STYLE)
                                    {
                                        "Record your first expense"
                                    }
                                }
                            }
                        }
                    }

                    @if !expenses.is_empty() {
                        tfoot
                        {
                            tr class="font-semibold text-gray-900 dark:text-white"
                            {
                                th scope="row" colspan="4" class=(TABLE_CELL_STYLE) { "Total" }
                                td class={ (TABLE_CELL_STYLE) " text-right" }
                                {
                                    @match total {
                                        Some(total) => (format_currency(total)),
                                        None => (TOTAL_TOO_LARGE),
                                    }
                                }
                                td {}
                            }
                        }
                    }
                }
            }
        }
    );

    base("Expenses", &content)
}

#[cfg(test)]
mod expenses_page_tests {
    use axum::{
        extract::{FromRef, State},
        http::StatusCode,
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        AppState,
        category::{Category, CategoryName},
        expense::{NewExpense, get_expenses_page},
        page_cache::{CachedView, InvalidateView},
        stores::{CategoryStore, ExpenseStore, TagStore},
        tag::TagName,
        test_utils::{assert_valid_html, get_test_app_state, parse_html_document},
    };

    use super::{ExpensesPageState, TOTAL_TOO_LARGE};

    fn create_food_category(app_state: &AppState) -> Category {
        app_state
            .category_store
            .create(CategoryName::new_unchecked("Food"))
            .unwrap()
    }

    fn row_text(document: &Html) -> Vec<Vec<String>> {
        let row_selector = Selector::parse("tbody tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        document
            .select(&row_selector)
            .map(|row| {
                row.select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect()
            })
            .collect()
    }

    #[tokio::test]
    async fn shows_expenses_latest_date_first() {
        let app_state = get_test_app_state();
        let food = create_food_category(&app_state);
        let work = app_state
            .tag_store
            .create(TagName::new_unchecked("work"))
            .unwrap();
        for (amount, description, date, tag_ids) in [
            (12, "Lunch", date!(2025 - 01 - 02), vec![work.id.clone()]),
            (150, "Groceries", date!(2025 - 01 - 05), vec![]),
        ] {
            app_state
                .expense_store
                .create(NewExpense {
                    amount,
                    description: description.to_owned(),
                    date,
                    category_id: food.id.clone(),
                    tag_ids,
                })
                .unwrap();
        }
        let state = ExpensesPageState::from_ref(&app_state);

        let response = get_expenses_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let rows = row_text(&document);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][..5], ["2025-01-05", "Groceries", "Food", "", "$150"]);
        assert_eq!(rows[1][..5], ["2025-01-02", "Lunch", "Food", "work", "$12"]);

        let total = document
            .select(&Selector::parse("tfoot td").unwrap())
            .next()
            .expect("Could not find total");
        assert_eq!(total.text().collect::<String>().trim(), "$162");
    }

    #[tokio::test]
    async fn total_that_overflows_is_not_shown() {
        let app_state = get_test_app_state();
        let food = create_food_category(&app_state);
        for description in ["House", "Yacht"] {
            app_state
                .expense_store
                .create(NewExpense {
                    amount: i64::MAX,
                    description: description.to_owned(),
                    date: date!(2025 - 01 - 01),
                    category_id: food.id.clone(),
                    tag_ids: vec![],
                })
                .unwrap();
        }
        let state = ExpensesPageState::from_ref(&app_state);

        let response = get_expenses_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_eq!(row_text(&document).len(), 2);
        let total = document
            .select(&Selector::parse("tfoot td").unwrap())
            .next()
            .expect("Could not find total");
        assert_eq!(total.text().collect::<String>().trim(), TOTAL_TOO_LARGE);
    }

    #[tokio::test]
    async fn renaming_category_refreshes_cached_page() {
        let app_state = get_test_app_state();
        let food = create_food_category(&app_state);
        app_state
            .expense_store
            .create(NewExpense {
                amount: 5,
                description: "Snack".to_owned(),
                date: date!(2025 - 01 - 01),
                category_id: food.id.clone(),
                tag_ids: vec![],
            })
            .unwrap();
        let state = ExpensesPageState::from_ref(&app_state);
        get_expenses_page(State(state.clone())).await;

        app_state
            .category_store
            .update(&food.id, CategoryName::new_unchecked("Snacks"))
            .unwrap();
        let cached = parse_html_document(get_expenses_page(State(state.clone())).await).await;
        state.page_cache.invalidate(CachedView::Categories);
        let fresh = parse_html_document(get_expenses_page(State(state)).await).await;

        assert_eq!(row_text(&cached)[0][2], "Food");
        assert_eq!(row_text(&fresh)[0][2], "Snacks");
    }
}
