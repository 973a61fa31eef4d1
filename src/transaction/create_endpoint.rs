//! Defines the endpoint for recording a transaction.
//!
//! The transaction kind comes from the URL's intent tag, never from the form
//! body.

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
        TransactionKind, create_page::render_create_transaction_page, create_transaction,
        form::TransactionFormData,
    },
    user::UserID,
};

/// The state needed to record a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for recording an income or expense transaction.
///
/// Redirects to the account's transactions view on success, otherwise
/// re-renders the form with validation messages. An unrecognised kind
/// segment redirects to the transactions view with a warning notice, and an
/// account that does not belong to the logged-in user gives the 404 page.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path((account_id, kind_tag)): Path<(AccountId, String)>,
    Form(form): Form<TransactionFormData>,
) -> Result<Response, Error> {
    let Some(kind) = TransactionKind::from_intent_tag(&kind_tag) else {
        return Ok(Notice::UnknownTransactionKind.redirect(endpoints::TRANSACTIONS_VIEW));
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = get_account(account_id, user_id, &connection)?;

    let new_transaction = match form.validate(account_id, kind) {
        Ok(new_transaction) => new_transaction,
        Err(errors) => {
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                render_create_transaction_page(
                    account_id,
                    &account.full_name,
                    kind,
                    &form,
                    &errors,
                ),
            )
                .into_response());
        }
    };

    create_transaction(&new_transaction, &connection)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    Ok(Notice::TransactionCreated
        .redirect(&format_endpoint(endpoints::ACCOUNT_TRANSACTIONS_VIEW, account_id)))
}
