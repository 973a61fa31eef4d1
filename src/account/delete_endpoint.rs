//! Defines the endpoint for deleting an account.
//!
//! Accounts that still have transactions are never deleted; the request
//! bounces back to the accounts view with a warning notice instead.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{AccountId, count_account_transactions, delete_account, get_account},
    alert::Notice,
    endpoints,
    user::UserID,
};

/// The state needed to delete an account.
#[derive(Debug, Clone)]
pub struct DeleteAccountState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an account.
///
/// Redirects to the accounts view with a success notice, or with a warning
/// notice when the account still has transactions. Returns the 404 page if
/// the account does not belong to the logged-in user.
pub async fn delete_account_endpoint(
    State(state): State<DeleteAccountState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<AccountId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    // Confirm ownership before anything else so that a foreign account ID
    // gives a 404 rather than leaking the transaction count.
    get_account(account_id, user_id, &connection)?;

    let transaction_count = count_account_transactions(account_id, &connection)?;
    if transaction_count > 0 {
        return Ok(Notice::AccountHasTransactions.redirect(endpoints::ACCOUNTS));
    }

    delete_account(account_id, user_id, &connection)?;

    Ok(Notice::AccountDeleted.redirect(endpoints::ACCOUNTS))
}
