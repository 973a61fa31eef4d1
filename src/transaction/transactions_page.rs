//! Displays all the user's transactions across accounts, with search and
//! pagination.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Notice,
    endpoints::{self, format_endpoint, format_transaction_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    jalali::format_jalali,
    navigation::NavBar,
    pagination::{PaginationConfig, render_pager},
    transaction::{TransactionKind, TransactionWithAccount, list_transactions_for_user},
    user::UserID,
};

/// The state needed for the [get_transactions_page] route handler.
#[derive(Debug, Clone)]
pub struct TransactionListState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters accepted by the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionListQuery {
    /// The search query, matched against descriptions.
    #[serde(default)]
    pub q: String,
    /// The 1-indexed page to show.
    pub page: Option<u64>,
    /// A notice code set by a redirecting endpoint.
    pub notice: Option<String>,
}

/// Renders the page listing all of the logged-in user's transactions, most
/// recently recorded first.
pub async fn get_transactions_page(
    State(state): State<TransactionListState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let page = list_transactions_for_user(
        user_id,
        &query.q,
        query.page.unwrap_or(1),
        state.pagination_config.page_size,
        &connection,
    )
    .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    let notice = query.notice.as_deref().and_then(Notice::from_code);
    let pager = render_pager(page.page, page.page_count, |page_number| {
        list_page_url(&query.q, page_number)
    });

    Ok(transactions_view(&page.transactions, &query.q, notice, &pager).into_response())
}

/// The transactions page URL carrying the search query and a page number.
fn list_page_url(search_query: &str, page: u64) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    if !search_query.is_empty() {
        params.push(("q", search_query.to_owned()));
    }
    params.push(("page", page.to_string()));

    match serde_urlencoded::to_string(&params) {
        Ok(query) => format!("{}?{}", endpoints::TRANSACTIONS_VIEW, query),
        Err(_) => endpoints::TRANSACTIONS_VIEW.to_owned(),
    }
}

pub(super) fn transaction_table_row(row: &TransactionWithAccount, show_account: bool) -> Markup {
    let transaction = &row.transaction;
    let edit_url = format_transaction_endpoint(
        endpoints::EDIT_TRANSACTION_VIEW,
        transaction.account_id,
        transaction.id,
    );
    let delete_url = format_transaction_endpoint(
        endpoints::DELETE_TRANSACTION_VIEW,
        transaction.account_id,
        transaction.id,
    );
    let amount_style = match transaction.kind {
        TransactionKind::Income => "text-green-600 dark:text-green-400",
        TransactionKind::Expense => "text-red-600 dark:text-red-400",
    };

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (format_jalali(transaction.date)) }

            @if show_account {
                td class=(TABLE_CELL_STYLE)
                {
                    a
                        href=(format_endpoint(endpoints::ACCOUNT_DETAIL_VIEW, transaction.account_id))
                        class=(LINK_STYLE)
                    { (row.account_name) }
                }
            }

            td class=(TABLE_CELL_STYLE) { (transaction.kind.label()) }

            td class=(format!("{TABLE_CELL_STYLE} {amount_style}"))
            {
                (transaction.amount)
            }

            td class=(TABLE_CELL_STYLE)
            {
                (transaction.category.as_deref().unwrap_or("—"))
            }

            td class=(TABLE_CELL_STYLE)
            {
                (transaction.description.as_deref().unwrap_or("—"))
            }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                    a href=(delete_url) class=(LINK_STYLE) { "Delete" }
                }
            }
        }
    )
}

fn transactions_view(
    transactions: &[TransactionWithAccount],
    search_query: &str,
    notice: Option<Notice>,
    pager: &Markup,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                @if let Some(notice) = notice {
                    (notice.banner())
                }

                h1 class="text-xl font-bold" { "Transactions" }

                form method="get" action=(endpoints::TRANSACTIONS_VIEW) class="flex gap-2"
                {
                    input
                        type="search"
                        name="q"
                        value=(search_query)
                        placeholder="Search descriptions"
                        class=(FORM_TEXT_INPUT_STYLE);

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Search" }
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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Account" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Kind" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for row in transactions {
                                (transaction_table_row(row, true))
                            }

                            @if transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="7"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No transactions found."
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

    base("Transactions", &content)
}
