//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/tags/{tag_id}', use [format_endpoint].

/// The root route which redirects to the expenses page.
pub const ROOT: &str = "/";
/// The dashboard route which redirects to the expenses page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The page for listing all expenses.
pub const EXPENSES_VIEW: &str = "/dashboard/expense";
/// The page for creating a new expense.
pub const NEW_EXPENSE_VIEW: &str = "/dashboard/expense/new";
/// The page for editing an existing expense.
pub const EDIT_EXPENSE_VIEW: &str = "/dashboard/expense/{expense_id}/edit";

/// The page for listing all categories.
pub const CATEGORIES_VIEW: &str = "/dashboard/category";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/dashboard/category/new";
/// The page for editing an existing category.
pub const EDIT_CATEGORY_VIEW: &str = "/dashboard/category/{category_id}/edit";

/// The page for listing all tags.
pub const TAGS_VIEW: &str = "/dashboard/tag";
/// The page for creating a new tag.
pub const NEW_TAG_VIEW: &str = "/dashboard/tag/new";
/// The page for editing an existing tag.
pub const EDIT_TAG_VIEW: &str = "/dashboard/tag/{tag_id}/edit";

/// The route to list (GET) and create (POST) expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to update (PUT) and delete (DELETE) a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to list (GET) and create (POST) categories.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route to update (PUT) and delete (DELETE) a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to list (GET) and create (POST) tags.
pub const TAGS_API: &str = "/api/tags";
/// The route to update (PUT) and delete (DELETE) a single tag.
pub const TAG: &str = "/api/tags/{tag_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/tags/{tag_id}', '{tag_id}' is the parameter.
///
/// This function assumes that an endpoint path contains a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
