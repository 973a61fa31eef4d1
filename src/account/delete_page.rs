//! Defines the route handler for the delete confirmation page for an account.

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
    endpoints::{self, format_endpoint},
    html::{BUTTON_DANGER_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    user::UserID,
};

/// The state needed for the delete account page.
#[derive(Debug, Clone)]
pub struct DeleteAccountPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteAccountPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the confirmation page for deleting an account.
///
/// Returns the 404 page if the account does not belong to the logged-in
/// user.
pub async fn get_delete_account_page(
    State(state): State<DeleteAccountPageState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<AccountId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = get_account(account_id, user_id, &connection)?;

    let nav_bar = NavBar::new(endpoints::ACCOUNTS).into_html();
    let action = format_endpoint(endpoints::DELETE_ACCOUNT_VIEW, account_id);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-md"
            {
                h1 class="text-xl font-bold" { "Delete Account" }

                p
                {
                    "Are you sure you want to delete the account '"
                    (account.full_name)
                    "'? This cannot be undone."
                }

                form method="post" action=(action) class="space-y-4"
                {
                    button type="submit" class=(BUTTON_DANGER_STYLE) { "Delete account" }
                }

                a href=(endpoints::ACCOUNTS) class=(LINK_STYLE) { "Cancel" }
            }
        }
    );

    Ok(base("Delete Account", &content).into_response())
}
