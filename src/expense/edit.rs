//! Expense editing page and endpoint.

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
    expense::{
        ExpenseId,
        form::{ExpenseFormOptions, ExpenseFormValues, expense_form_fields},
        update_expense,
    },
    form::RawForm,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, form_error_message},
    navigation::NavBar,
    page_cache::PageCache,
    stores::{
        ExpenseStore, StoreError,
        sqlite::{SQLiteCategoryStore, SQLiteExpenseStore, SQLiteTagStore},
    },
};

/// The state needed for the edit expense page and its endpoint.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    pub expense_store: SQLiteExpenseStore,
    pub category_store: SQLiteCategoryStore,
    pub tag_store: SQLiteTagStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
            category_store: state.category_store.clone(),
            tag_store: state.tag_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// Renders the edit expense page with the expense's current values.
pub async fn get_edit_expense_page(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<EditExpenseState>,
) -> Response {
    let edit_endpoint = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, &expense_id);
    let update_endpoint = format_endpoint(endpoints::EXPENSE, &expense_id);

    let options = match ExpenseFormOptions::load(&state.category_store, &state.tag_store) {
        Ok(options) => options,
        Err(error) => return error.into_page_response(),
    };

    let (values, error_message) = match state.expense_store.get(&expense_id) {
        Ok(expense) => (ExpenseFormValues::from_expense(&expense), ""),
        Err(StoreError::NotFound) => (ExpenseFormValues::default(), "Expense not found"),
        Err(error) => {
            tracing::error!("Failed to retrieve expense {expense_id}: {error}");
            (ExpenseFormValues::default(), "Failed to load expense")
        }
    };

    let nav_bar = NavBar::new(&edit_endpoint).into_html();
    let form = edit_expense_form_view(&update_endpoint, &values, &options, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Expense", &content).into_response()
}

/// A route handler for replacing an expense.
///
/// The submitted tags become the expense's complete tag set. The expense ID
/// is taken from the path.
pub async fn update_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<EditExpenseState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let mut form = RawForm::from(fields);
    form.set("id", &expense_id);

    match update_expense(&form, &state.expense_store, &state.page_cache) {
        Ok(()) => (
            HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::Validation(message)) => {
            let options = match ExpenseFormOptions::load(&state.category_store, &state.tag_store) {
                Ok(options) => options,
                Err(error) => return error.into_alert_response(),
            };
            let update_endpoint = format_endpoint(endpoints::EXPENSE, &expense_id);

            edit_expense_form_view(
                &update_endpoint,
                &ExpenseFormValues::from_form(&form),
                &options,
                &message,
            )
            .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

fn edit_expense_form_view(
    update_endpoint: &str,
    values: &ExpenseFormValues,
    options: &ExpenseFormOptions,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Edit Expense" }

            (expense_form_fields(values, options))

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Expense" }
        }
    }
}

#[cfg(test)]
mod edit_expense_page_tests {
    use axum::{
        extract::{FromRef, Path, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        category::CategoryName,
        endpoints::{self, format_endpoint},
        expense::{NewExpense, get_edit_expense_page},
        stores::{CategoryStore, ExpenseStore, TagStore},
        tag::TagName,
        test_utils::{
            assert_form_checkbox, assert_form_error_message, assert_form_input_with_value,
            assert_form_select, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_valid_html, get_test_app_state, must_get_form, parse_html_document,
        },
    };

    use super::EditExpenseState;

    #[tokio::test]
    async fn render_page_with_current_values() {
        let state = EditExpenseState::from_ref(&get_test_app_state());
        let food = state
            .category_store
            .create(CategoryName::new_unchecked("Food"))
            .unwrap();
        let work = state.tag_store.create(TagName::new_unchecked("work")).unwrap();
        let trip = state.tag_store.create(TagName::new_unchecked("trip")).unwrap();
        let expense_id = state
            .expense_store
            .create(NewExpense {
                amount: 30,
                description: "Dinner".to_owned(),
                date: date!(2025 - 03 - 04),
                category_id: food.id.clone(),
                tag_ids: vec![work.id.clone()],
            })
            .unwrap();

        let response = get_edit_expense_page(Path(expense_id.clone()), State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(
            &form,
            &format_endpoint(endpoints::EXPENSE, &expense_id),
            "hx-put",
        );
        assert_form_input_with_value(&form, "amount", "number", "30");
        assert_form_input_with_value(&form, "description", "text", "Dinner");
        assert_form_input_with_value(&form, "date", "date", "2025-03-04");
        assert_form_select(&form, "categoryId", &[food.id.as_str()]);
        assert_form_checkbox(&form, "tags", &work.id, true);
        assert_form_checkbox(&form, "tags", &trip.id, false);
        assert_form_submit_button_with_text(&form, "Update Expense");
    }

    #[tokio::test]
    async fn unknown_expense_shows_error() {
        let state = EditExpenseState::from_ref(&get_test_app_state());

        let response = get_edit_expense_page(Path("missing".to_owned()), State(state)).await;

        let document = parse_html_document(response).await;
        assert_form_error_message(&must_get_form(&document), "Expense not found");
    }
}
