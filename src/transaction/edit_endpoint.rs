//! Defines the endpoint for editing a transaction.
//!
//! The amount, category, description, and date can change. The kind cannot.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{AccountId, get_account},
    alert::Notice,
    endpoints::{self, format_endpoint},
    transaction::{
        TransactionId, edit_page::render_edit_transaction_page, form::TransactionFormData,
        get_transaction, update_transaction,
    },
    user::UserID,
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for editing a transaction.
///
/// Redirects to the account's transactions view on success, otherwise
/// re-renders the form with validation messages. Returns the 404 page if the
/// account does not belong to the logged-in user, or the transaction does
/// not belong to the account.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path((account_id, transaction_id)): Path<(AccountId, TransactionId)>,
    Form(form): Form<TransactionFormData>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_account(account_id, user_id, &connection)?;
    let transaction = get_transaction(transaction_id, account_id, &connection)?;

    let updated = match form.validate(account_id, transaction.kind) {
        Ok(updated) => updated,
        Err(errors) => {
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                render_edit_transaction_page(
                    account_id,
                    transaction_id,
                    transaction.kind,
                    &form,
                    &errors,
                ),
            )
                .into_response());
        }
    };

    update_transaction(
        transaction_id,
        account_id,
        updated.amount,
        updated.category.as_deref(),
        updated.description.as_deref(),
        updated.date,
        &connection,
    )
    .inspect_err(|error| tracing::error!("could not update transaction: {error}"))?;

    Ok(Notice::TransactionUpdated
        .redirect(&format_endpoint(endpoints::ACCOUNT_TRANSACTIONS_VIEW, account_id)))
}
