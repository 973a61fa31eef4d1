//! The application's endpoint URIs.
//!
//! For endpoints that take parameters, e.g. '/accounts/{account_id}', use
//! [format_endpoint] or one of the convenience functions below.

/// The root route which redirects to the accounts page.
pub const ROOT: &str = "/";
/// The page listing the user's accounts.
pub const ACCOUNTS: &str = "/accounts";
/// The page for creating a new account.
pub const NEW_ACCOUNT_VIEW: &str = "/accounts/new";
/// The page showing a single account and its balance.
pub const ACCOUNT_DETAIL_VIEW: &str = "/accounts/{account_id}";
/// The page for editing an existing account.
pub const EDIT_ACCOUNT_VIEW: &str = "/accounts/{account_id}/edit";
/// The delete confirmation page for an account.
pub const DELETE_ACCOUNT_VIEW: &str = "/accounts/{account_id}/delete";
/// The page listing all the user's transactions across accounts.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page listing one account's transactions with its balance.
pub const ACCOUNT_TRANSACTIONS_VIEW: &str = "/accounts/{account_id}/transactions";
/// The page for recording a transaction. The `kind` segment is the intent
/// tag: `re` for income, `ex` for expense.
pub const NEW_TRANSACTION_VIEW: &str = "/accounts/{account_id}/transactions/new/{kind}";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str =
    "/accounts/{account_id}/transactions/{transaction_id}/edit";
/// The delete confirmation page for a transaction.
pub const DELETE_TRANSACTION_VIEW: &str =
    "/accounts/{account_id}/transactions/{transaction_id}/delete";

/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to create users.
pub const USERS: &str = "/api/users";

/// Replace the first parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. For
/// example, in the endpoint path '/accounts/{account_id}', '{account_id}' is
/// the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
fn replace_first_param(endpoint_path: &str, value: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}

/// Replace the first parameter in `endpoint_path` with `id`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    replace_first_param(endpoint_path, &id.to_string())
}

/// Build the URL for a route nested under an account, e.g. the edit or
/// delete page for one transaction.
pub fn format_transaction_endpoint(
    endpoint_path: &str,
    account_id: i64,
    transaction_id: i64,
) -> String {
    format_endpoint(&format_endpoint(endpoint_path, account_id), transaction_id)
}

/// Build the URL for recording a new transaction against an account.
///
/// `intent_tag` should be `re` for income or `ex` for expense.
pub fn format_new_transaction_endpoint(account_id: i64, intent_tag: &str) -> String {
    replace_first_param(
        &format_endpoint(NEW_TRANSACTION_VIEW, account_id),
        intent_tag,
    )
}
