//! Defines the route handler for the page for editing an account.

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
    account::{
        AccountId,
        form::{AccountFormData, AccountFormErrors, account_form},
        get_account,
    },
    endpoints::{self, format_endpoint},
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    user::UserID,
};

/// The state needed for the edit account page.
#[derive(Debug, Clone)]
pub struct EditAccountPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditAccountPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing an account.
///
/// Returns the 404 page if the account does not belong to the logged-in
/// user.
pub async fn get_edit_account_page(
    State(state): State<EditAccountPageState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<AccountId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = get_account(account_id, user_id, &connection)?;

    Ok(render_edit_account_page(
        account_id,
        &AccountFormData::from(&account),
        &AccountFormErrors::default(),
    )
    .into_response())
}

/// The edit account page, re-rendered with `data` and `errors` after a
/// failed submission.
pub(super) fn render_edit_account_page(
    account_id: AccountId,
    data: &AccountFormData,
    errors: &AccountFormErrors,
) -> maud::Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS).into_html();
    let action = format_endpoint(endpoints::EDIT_ACCOUNT_VIEW, account_id);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-md"
            {
                h1 class="text-xl font-bold" { "Edit Account" }

                (account_form(&action, data, errors, "Save changes"))
            }
        }
    );

    base("Edit Account", &content)
}
