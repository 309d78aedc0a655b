//! Expense creation page and endpoint.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    expense::{
        create_expense,
        form::{ExpenseFormOptions, ExpenseFormValues, expense_form_fields},
    },
    form::RawForm,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, form_error_message},
    navigation::NavBar,
    page_cache::PageCache,
    stores::sqlite::{SQLiteCategoryStore, SQLiteExpenseStore, SQLiteTagStore},
};

/// The state needed for the new expense page.
#[derive(Debug, Clone)]
pub struct NewExpensePageState {
    pub category_store: SQLiteCategoryStore,
    pub tag_store: SQLiteTagStore,
}

impl FromRef<AppState> for NewExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_store: state.category_store.clone(),
            tag_store: state.tag_store.clone(),
        }
    }
}

/// The state needed for creating an expense.
///
/// The category and tag stores are only used to re-render the form when the
/// submission is rejected.
#[derive(Debug, Clone)]
pub struct CreateExpenseEndpointState {
    pub expense_store: SQLiteExpenseStore,
    pub category_store: SQLiteCategoryStore,
    pub tag_store: SQLiteTagStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for CreateExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
            category_store: state.category_store.clone(),
            tag_store: state.tag_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// Renders the page for recording an expense, dated today by default.
pub async fn get_new_expense_page(State(state): State<NewExpensePageState>) -> Response {
    let options = match ExpenseFormOptions::load(&state.category_store, &state.tag_store) {
        Ok(options) => options,
        Err(error) => return error.into_page_response(),
    };

    let today = OffsetDateTime::now_utc().date();
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html();
    let form = new_expense_form_view(&ExpenseFormValues::new(today), &options, "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Record Expense", &content).into_response()
}

/// A route handler for recording a new expense.
///
/// On success the client is redirected to the expenses page. A rejected
/// submission re-renders the form with the user's input and every problem
/// found.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseEndpointState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let form = RawForm::from(fields);

    match create_expense(&form, &state.expense_store, &state.page_cache) {
        Ok(()) => (
            HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::Validation(message)) => {
            match ExpenseFormOptions::load(&state.category_store, &state.tag_store) {
                Ok(options) => new_expense_form_view(
                    &ExpenseFormValues::from_form(&form),
                    &options,
                    &message,
                )
                .into_response(),
                Err(error) => error.into_alert_response(),
            }
        }
        Err(error) => error.into_alert_response(),
    }
}

fn new_expense_form_view(
    values: &ExpenseFormValues,
    options: &ExpenseFormOptions,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::EXPENSES_API)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Record Expense" }

            (expense_form_fields(values, options))

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Record Expense" }
        }
    }
}
