use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    alert::Alert,
    expense::{ExpenseId, delete_expense},
    page_cache::PageCache,
    stores::sqlite::SQLiteExpenseStore,
};

#[derive(Debug, Clone)]
pub struct DeleteExpenseEndpointState {
    pub expense_store: SQLiteExpenseStore,
    pub page_cache: PageCache,
}

impl FromRef<AppState> for DeleteExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
            page_cache: state.page_cache.clone(),
        }
    }
}

/// A route handler for deleting an expense and its tag associations.
pub async fn delete_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<DeleteExpenseEndpointState>,
) -> Response {
    match delete_expense(&expense_id, &state.expense_store, &state.page_cache) {
        Ok(()) => Alert::SuccessSimple {
            message: "Expense deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use axum::{
        extract::{FromRef, Path, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        category::CategoryName,
        expense::{NewExpense, delete_expense_endpoint},
        page_cache::CachedView,
        stores::{CategoryStore, ExpenseStore, StoreError, TagStore},
        tag::TagName,
        test_utils::{assert_valid_html, get_test_app_state, parse_html_fragment},
    };

    use super::DeleteExpenseEndpointState;

    #[tokio::test]
    async fn can_delete_expense() {
        let app_state = get_test_app_state();
        let state = DeleteExpenseEndpointState::from_ref(&app_state);
        let food = app_state
            .category_store
            .create(CategoryName::new_unchecked("Food"))
            .unwrap();
        let work = app_state
            .tag_store
            .create(TagName::new_unchecked("work"))
            .unwrap();
        let expense_id = state
            .expense_store
            .create(NewExpense {
                amount: 8,
                description: "Coffee".to_owned(),
                date: date!(2025 - 01 - 01),
                category_id: food.id,
                tag_ids: vec![work.id.clone()],
            })
            .unwrap();
        state
            .page_cache
            .insert(CachedView::Expenses, "stale".to_owned());

        let response = delete_expense_endpoint(Path(expense_id.clone()), State(state.clone())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_valid_html(&parse_html_fragment(response).await);
        assert_eq!(
            state.expense_store.get(&expense_id),
            Err(StoreError::NotFound)
        );
        assert_eq!(app_state.tag_store.get(&work.id), Ok(work));
        assert_eq!(state.page_cache.get(CachedView::Expenses), None);
    }

    #[tokio::test]
    async fn unknown_expense_returns_error_alert() {
        let state = DeleteExpenseEndpointState::from_ref(&get_test_app_state());

        let response = delete_expense_endpoint(Path("missing".to_owned()), State(state)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
