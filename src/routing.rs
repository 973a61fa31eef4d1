//! Application router configuration with protected and unprotected route
//! definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    account::{
        create_account_endpoint, delete_account_endpoint, edit_account_endpoint,
        get_account_detail_page, get_accounts_page, get_create_account_page,
        get_delete_account_page, get_edit_account_page,
    },
    auth::auth_guard,
    endpoints,
    log_in::{get_log_in_page, post_log_in},
    log_out::get_log_out,
    not_found::get_404_not_found,
    register_user::{create_user_endpoint, get_register_page},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_account_transactions_page, get_create_transaction_page, get_delete_transaction_page,
        get_edit_transaction_page, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::USERS, post(create_user_endpoint));

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::ACCOUNTS, get(get_accounts_page))
        .route(
            endpoints::NEW_ACCOUNT_VIEW,
            get(get_create_account_page).post(create_account_endpoint),
        )
        .route(endpoints::ACCOUNT_DETAIL_VIEW, get(get_account_detail_page))
        .route(
            endpoints::EDIT_ACCOUNT_VIEW,
            get(get_edit_account_page).post(edit_account_endpoint),
        )
        .route(
            endpoints::DELETE_ACCOUNT_VIEW,
            get(get_delete_account_page).post(delete_account_endpoint),
        )
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::ACCOUNT_TRANSACTIONS_VIEW,
            get(get_account_transactions_page),
        )
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page).post(create_transaction_endpoint),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page).post(edit_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION_VIEW,
            get(get_delete_transaction_page).post(delete_transaction_endpoint),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .nest_service("/static", ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the accounts page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::ACCOUNTS)
}
