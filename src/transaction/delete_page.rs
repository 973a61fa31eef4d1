//! Defines the route handler for the delete confirmation page for a
//! transaction.

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
    alert::Notice,
    endpoints::{self, format_endpoint, format_transaction_endpoint},
    html::{BUTTON_DANGER_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    jalali::format_jalali,
    navigation::NavBar,
    transaction::{TransactionId, get_transaction, transaction_belongs_to_user},
    user::UserID,
};

/// The state needed for the delete transaction page.
#[derive(Debug, Clone)]
pub struct DeleteTransactionPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the confirmation page for deleting a transaction.
///
/// A transaction reached through the wrong account's URL redirects to the
/// transactions view with a warning notice. Returns the 404 page if the
/// account does not belong to the logged-in user, or the transaction does
/// not exist.
pub async fn get_delete_transaction_page(
    State(state): State<DeleteTransactionPageState>,
    Extension(user_id): Extension<UserID>,
    Path((account_id, transaction_id)): Path<(AccountId, TransactionId)>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_account(account_id, user_id, &connection)?;

    let transaction = match get_transaction(transaction_id, account_id, &connection) {
        Ok(transaction) => transaction,
        Err(Error::NotFound) => {
            if transaction_belongs_to_user(transaction_id, user_id, &connection)? {
                return Ok(
                    Notice::TransactionAccountMismatch.redirect(endpoints::TRANSACTIONS_VIEW)
                );
            }

            return Err(Error::NotFound);
        }
        Err(error) => return Err(error),
    };

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let action =
        format_transaction_endpoint(endpoints::DELETE_TRANSACTION_VIEW, account_id, transaction_id);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-md"
            {
                h1 class="text-xl font-bold" { "Delete Transaction" }

                p
                {
                    "Are you sure you want to delete this "
                    (transaction.kind.label().to_lowercase())
                    " of "
                    (transaction.amount)
                    " dated "
                    (format_jalali(transaction.date))
                    "? This cannot be undone."
                }

                form method="post" action=(action) class="space-y-4"
                {
                    button type="submit" class=(BUTTON_DANGER_STYLE) { "Delete transaction" }
                }

                a
                    href=(format_endpoint(endpoints::ACCOUNT_TRANSACTIONS_VIEW, account_id))
                    class=(LINK_STYLE)
                { "Cancel" }
            }
        }
    );

    Ok(base("Delete Transaction", &content).into_response())
}
