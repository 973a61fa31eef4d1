//! Displays the user's accounts with search and pagination.

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
    account::{Account, list_accounts},
    alert::Notice,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    pagination::{PaginationConfig, render_pager},
    user::UserID,
};

/// The state needed for the [get_accounts_page] route handler.
#[derive(Debug, Clone)]
pub struct AccountListState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for AccountListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters accepted by the accounts page.
#[derive(Debug, Default, Deserialize)]
pub struct AccountListQuery {
    /// The search query, matched against names and contact fields.
    #[serde(default)]
    pub q: String,
    /// The 1-indexed page to show.
    pub page: Option<u64>,
    /// A notice code set by a redirecting endpoint.
    pub notice: Option<String>,
}

/// Renders the accounts page for the logged-in user.
pub async fn get_accounts_page(
    State(state): State<AccountListState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<AccountListQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let page = list_accounts(
        user_id,
        &query.q,
        query.page.unwrap_or(1),
        state.pagination_config.page_size,
        &connection,
    )
    .inspect_err(|error| tracing::error!("could not list accounts: {error}"))?;

    let notice = query.notice.as_deref().and_then(Notice::from_code);
    let pager = render_pager(page.page, page.page_count, |page_number| {
        list_page_url(&query.q, page_number)
    });

    Ok(accounts_view(&page.accounts, &query.q, notice, &pager).into_response())
}

/// The accounts page URL carrying the search query and a page number.
fn list_page_url(search_query: &str, page: u64) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    if !search_query.is_empty() {
        params.push(("q", search_query.to_owned()));
    }
    params.push(("page", page.to_string()));

    match serde_urlencoded::to_string(&params) {
        Ok(query) => format!("{}?{}", endpoints::ACCOUNTS, query),
        Err(_) => endpoints::ACCOUNTS.to_owned(),
    }
}

fn accounts_view(
    accounts: &[Account],
    search_query: &str,
    notice: Option<Notice>,
    pager: &Markup,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS).into_html();

    let table_row = |account: &Account| {
        let detail_url = format_endpoint(endpoints::ACCOUNT_DETAIL_VIEW, account.id);
        let edit_url = format_endpoint(endpoints::EDIT_ACCOUNT_VIEW, account.id);
        let delete_url = format_endpoint(endpoints::DELETE_ACCOUNT_VIEW, account.id);

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th
                    scope="row"
                    class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                {
                    a href=(detail_url) class=(LINK_STYLE) { (account.full_name) }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (account.email.as_deref().unwrap_or("—"))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (account.phone_number.as_deref().unwrap_or("—"))
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
    };

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
                    h1 class="text-xl font-bold" { "Accounts" }

                    a href=(endpoints::NEW_ACCOUNT_VIEW) class=(LINK_STYLE)
                    {
                        "Add Account"
                    }
                }

                form method="get" action=(endpoints::ACCOUNTS) class="flex gap-2"
                {
                    input
                        type="search"
                        name="q"
                        value=(search_query)
                        placeholder="Search accounts"
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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Email" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Phone" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for account in accounts {
                                (table_row(account))
                            }

                            @if accounts.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No accounts found. Create an account "
                                        a href=(endpoints::NEW_ACCOUNT_VIEW) class=(LINK_STYLE)
                                        {
                                            "here"
                                        }
                                        "."
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

    base("Accounts", &content)
}
