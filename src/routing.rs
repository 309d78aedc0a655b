//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, put},
};

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_edit_category_page, get_new_category_page, list_categories_endpoint,
        update_category_endpoint,
    },
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_edit_expense_page,
        get_expenses_page, get_new_expense_page, list_expenses_endpoint, update_expense_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    tag::{
        create_tag_endpoint, delete_tag_endpoint, get_edit_tag_page, get_new_tag_page,
        get_tags_page, list_tags_endpoint, update_tag_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_index_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .route(endpoints::TAGS_VIEW, get(get_tags_page))
        .route(endpoints::NEW_TAG_VIEW, get(get_new_tag_page))
        .route(endpoints::EDIT_TAG_VIEW, get(get_edit_tag_page));

    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        )
        .route(
            endpoints::CATEGORIES_API,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(
            endpoints::TAGS_API,
            get(list_tags_endpoint).post(create_tag_endpoint),
        )
        .route(
            endpoints::TAG,
            put(update_tag_endpoint).delete(delete_tag_endpoint),
        );

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' and the bare dashboard redirect to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::{
        build_router,
        endpoints::{self, format_endpoint},
        test_utils::get_test_app_state,
    };

    fn get_test_server() -> TestServer {
        TestServer::try_new(build_router(get_test_app_state())).expect("Could not create test server.")
    }

    fn form_body(fields: &[(&str, &str)]) -> String {
        serde_html_form::to_string(fields).expect("Could not encode form")
    }

    async fn create_named(server: &TestServer, api: &str, name: &str) -> String {
        server
            .post(api)
            .text(form_body(&[("name", name)]))
            .content_type("application/x-www-form-urlencoded")
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let records: Value = server.get(api).await.json();
        records[0]["id"]
            .as_str()
            .expect("Could not get record ID")
            .to_owned()
    }

    #[tokio::test]
    async fn dashboard_redirects_to_expenses() {
        let server = get_test_server();

        for path in [endpoints::ROOT, endpoints::DASHBOARD_VIEW] {
            let response = server.get(path).await;

            response.assert_status(StatusCode::SEE_OTHER);
            assert_eq!(response.header("location"), endpoints::EXPENSES_VIEW);
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        get_test_server()
            .get("/dashboard/budget")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn list_pages_render() {
        let server = get_test_server();

        for path in [
            endpoints::EXPENSES_VIEW,
            endpoints::NEW_EXPENSE_VIEW,
            endpoints::CATEGORIES_VIEW,
            endpoints::NEW_CATEGORY_VIEW,
            endpoints::TAGS_VIEW,
            endpoints::NEW_TAG_VIEW,
        ] {
            server.get(path).await.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn expense_with_repeated_tags_round_trips_through_api() {
        let server = get_test_server();
        let category_id = create_named(&server, endpoints::CATEGORIES_API, "Food").await;
        let work_id = create_named(&server, endpoints::TAGS_API, "work").await;
        let trip_id = create_named(&server, endpoints::TAGS_API, "trip").await;

        let response = server
            .post(endpoints::EXPENSES_API)
            .text(form_body(&[
                ("amount", "20"),
                ("description", "Train"),
                ("date", "2025-04-01"),
                ("categoryId", category_id.as_str()),
                ("tags", work_id.as_str()),
                ("tags", trip_id.as_str()),
                ("tags", work_id.as_str()),
            ]))
            .content_type("application/x-www-form-urlencoded")
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("hx-redirect"), endpoints::EXPENSES_VIEW);

        let expenses: Value = server.get(endpoints::EXPENSES_API).await.json();
        assert_eq!(expenses[0]["amount"], 20);
        assert_eq!(expenses[0]["category"]["name"], "Food");
        let tag_names: Vec<&str> = expenses[0]["tags"]
            .as_array()
            .expect("Could not get tags")
            .iter()
            .filter_map(|tag| tag["name"].as_str())
            .collect();
        assert_eq!(tag_names, ["trip", "work"]);
    }

    #[tokio::test]
    async fn category_in_use_cannot_be_deleted() {
        let server = get_test_server();
        let category_id = create_named(&server, endpoints::CATEGORIES_API, "Food").await;
        server
            .post(endpoints::EXPENSES_API)
            .text(form_body(&[
                ("amount", "20"),
                ("description", "Lunch"),
                ("date", "2025-04-01"),
                ("categoryId", category_id.as_str()),
            ]))
            .content_type("application/x-www-form-urlencoded")
            .await
            .assert_status(StatusCode::SEE_OTHER);

        server
            .delete(&format_endpoint(endpoints::CATEGORY, category_id.as_str()))
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let categories: Value = server.get(endpoints::CATEGORIES_API).await.json();
        assert_eq!(categories.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn update_uses_id_from_path() {
        let server = get_test_server();
        let tag_id = create_named(&server, endpoints::TAGS_API, "wrok").await;

        server
            .put(&format_endpoint(endpoints::TAG, &tag_id))
            .text(form_body(&[("name", "work")]))
            .content_type("application/x-www-form-urlencoded")
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let tags: Value = server.get(endpoints::TAGS_API).await.json();
        assert_eq!(tags[0]["id"], tag_id.as_str());
        assert_eq!(tags[0]["name"], "work");
    }
}
