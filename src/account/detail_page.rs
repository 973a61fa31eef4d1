//! Displays a single account: contact details, the current balance, and
//! links for recording transactions against it.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{AccountId, get_account},
    endpoints::{self, format_endpoint, format_new_transaction_endpoint},
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    transaction::{TransactionKind, account_balance},
    user::UserID,
};

/// The state needed for the account detail page.
#[derive(Debug, Clone)]
pub struct AccountDetailState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountDetailState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the detail page for one account.
///
/// Returns the 404 page if the account does not belong to the logged-in
/// user.
pub async fn get_account_detail_page(
    State(state): State<AccountDetailState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<AccountId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = get_account(account_id, user_id, &connection)?;
    let balance = account_balance(account_id, &connection)
        .inspect_err(|error| tracing::error!("could not compute account balance: {error}"))?;

    let nav_bar = NavBar::new(endpoints::ACCOUNTS).into_html();

    let detail_row = |label: &str, value: Option<&str>| {
        html!(
            div class="flex justify-between gap-4 py-2 border-b border-gray-200 dark:border-gray-700"
            {
                dt class="font-medium" { (label) }
                dd class="text-gray-600 dark:text-gray-300" { (value.unwrap_or("—")) }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-2xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { (account.full_name) }

                    div class="flex gap-4"
                    {
                        a
                            href=(format_endpoint(endpoints::EDIT_ACCOUNT_VIEW, account.id))
                            class=(LINK_STYLE)
                        { "Edit" }
                        a
                            href=(format_endpoint(endpoints::DELETE_ACCOUNT_VIEW, account.id))
                            class=(LINK_STYLE)
                        { "Delete" }
                    }
                }

                dl
                {
                    (detail_row("Email", account.email.as_deref()))
                    (detail_row("Phone number", account.phone_number.as_deref()))
                    (detail_row("Address", account.address.as_deref()))
                    (detail_row("Balance", Some(balance.to_string().as_str())))
                }

                div class="flex gap-4"
                {
                    a
                        href=(format_new_transaction_endpoint(account.id, TransactionKind::Income.intent_tag()))
                        class=(LINK_STYLE)
                    { "Record income" }

                    a
                        href=(format_new_transaction_endpoint(account.id, TransactionKind::Expense.intent_tag()))
                        class=(LINK_STYLE)
                    { "Record expense" }

                    a
                        href=(format_endpoint(endpoints::ACCOUNT_TRANSACTIONS_VIEW, account.id))
                        class=(LINK_STYLE)
                    { "View transactions" }
                }
            }
        }
    );

    Ok(base(&account.full_name, &content).into_response())
}
