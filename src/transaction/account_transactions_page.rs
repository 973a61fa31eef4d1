//! Displays one account's transactions with its running balance.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    account::{AccountId, get_account},
    alert::Notice,
    endpoints::{self, format_endpoint, format_new_transaction_endpoint},
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, base},
    navigation::NavBar,
    pagination::{PaginationConfig, render_pager},
    transaction::{
        TransactionKind, account_balance, list_transactions_for_account,
        transactions_page::transaction_table_row,
    },
    user::UserID,
};

/// The state needed for the [get_account_transactions_page] route handler.
#[derive(Debug, Clone)]
pub struct AccountTransactionListState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for AccountTransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters accepted by the account transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct AccountTransactionListQuery {
    /// The 1-indexed page to show.
    pub page: Option<u64>,
    /// A notice code set by a redirecting endpoint.
    pub notice: Option<String>,
}

/// Renders the page listing one account's transactions, most recently
/// recorded first, with the account's balance.
///
/// Returns the 404 page if the account does not belong to the logged-in
/// user.
pub async fn get_account_transactions_page(
    State(state): State<AccountTransactionListState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<AccountId>,
    Query(query): Query<AccountTransactionListQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = get_account(account_id, user_id, &connection)?;
    let balance = account_balance(account_id, &connection)
        .inspect_err(|error| tracing::error!("could not compute account balance: {error}"))?;
    let page = list_transactions_for_account(
        account_id,
        query.page.unwrap_or(1),
        state.pagination_config.page_size,
        &connection,
    )
    .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    let notice = query.notice.as_deref().and_then(Notice::from_code);
    let base_url = format_endpoint(endpoints::ACCOUNT_TRANSACTIONS_VIEW, account_id);
    let pager = render_pager(page.page, page.page_count, |page_number| {
        format!("{base_url}?page={page_number}")
    });

    let nav_bar = NavBar::new(endpoints::ACCOUNTS).into_html();
    let title = format!("Transactions for {}", account.full_name);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                @if let Some(notice) = notice {
                    (notice.banner())
                }

                header class="flex justify-between flex-wrap items-end"
                {
                    div
                    {
                        h1 class="text-xl font-bold" { (title) }
                        p class="text-gray-600 dark:text-gray-300" { "Balance: " (balance) }
                    }

                    div class="flex gap-4"
                    {
                        a
                            href=(format_new_transaction_endpoint(account_id, TransactionKind::Income.intent_tag()))
                            class=(LINK_STYLE)
                        { "Record income" }

                        a
                            href=(format_new_transaction_endpoint(account_id, TransactionKind::Expense.intent_tag()))
                            class=(LINK_STYLE)
                        { "Record expense" }
                    }
                }

                section class="w-full overflow-x-auto dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Kind" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for row in &page.transactions {
                                (transaction_table_row(row, false))
                            }

                            @if page.transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="6"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No transactions recorded for this account yet."
                                    }
                                }
                            }
                        }
                    }
                }

                (pager)
            }
        }
    );

    Ok(base(&title, &content).into_response())
}
