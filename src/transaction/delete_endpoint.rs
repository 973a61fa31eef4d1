//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{AccountId, get_account},
    alert::Notice,
    endpoints::{self, format_endpoint},
    transaction::{TransactionId, delete_transaction, transaction_belongs_to_user},
    user::UserID,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// Redirects to the account's transactions view with a success notice. A
/// transaction reached through the wrong account's URL redirects to the
/// transactions view with a warning notice instead of deleting anything.
/// Returns the 404 page if the account does not belong to the logged-in
/// user, or the transaction does not exist.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path((account_id, transaction_id)): Path<(AccountId, TransactionId)>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_account(account_id, user_id, &connection)?;

    match delete_transaction(transaction_id, account_id, &connection) {
        Ok(()) => {}
        Err(Error::NotFound) => {
            if transaction_belongs_to_user(transaction_id, user_id, &connection)? {
                return Ok(
                    Notice::TransactionAccountMismatch.redirect(endpoints::TRANSACTIONS_VIEW)
                );
            }

            return Err(Error::NotFound);
        }
        Err(error) => return Err(error),
    }

    Ok(Notice::TransactionDeleted
        .redirect(&format_endpoint(endpoints::ACCOUNT_TRANSACTIONS_VIEW, account_id)))
}

#[cfg(test)]
mod delete_transaction_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
    };
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        Error,
        account::Account,
        test_utils::{
            assert_redirects_to, get_test_connection, insert_test_account, insert_test_user,
        },
        transaction::{
            NewTransaction, Transaction, TransactionKind, create_transaction, get_transaction,
        },
        user::User,
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn get_test_state() -> (DeleteTransactionState, User, Account, Transaction) {
        let connection = get_test_connection();
        let user = insert_test_user("hello@example.com", &connection);
        let account = insert_test_account("Sara Rostami", &user, &connection);
        let transaction = create_transaction(
            &NewTransaction {
                account_id: account.id,
                kind: TransactionKind::Income,
                amount: Decimal::new(10000, 2),
                category: None,
                description: None,
                date: date!(2023 - 10 - 10),
            },
            &connection,
        )
        .unwrap();

        (
            DeleteTransactionState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            user,
            account,
            transaction,
        )
    }

    #[tokio::test]
    async fn deletes_transaction_and_redirects() {
        let (state, user, account, transaction) = get_test_state();

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(user.id),
            Path((account.id, transaction.id)),
        )
        .await
        .unwrap();

        assert_redirects_to(
            &response,
            &format!("/accounts/{}/transactions?notice=transaction_deleted", account.id),
        );

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_transaction(transaction.id, account.id, &connection),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn wrong_account_redirects_without_deleting() {
        let (state, user, account, transaction) = get_test_state();
        let other_account = {
            let connection = state.db_connection.lock().unwrap();
            insert_test_account("Omid Karimi", &user, &connection)
        };

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(user.id),
            Path((other_account.id, transaction.id)),
        )
        .await
        .unwrap();

        assert_redirects_to(&response, "/transactions?notice=transaction_account_mismatch");

        let connection = state.db_connection.lock().unwrap();
        assert!(get_transaction(transaction.id, account.id, &connection).is_ok());
    }

    #[tokio::test]
    async fn other_users_account_is_not_found() {
        let (state, _owner, account, transaction) = get_test_state();
        let other = {
            let connection = state.db_connection.lock().unwrap();
            insert_test_user("other@example.com", &connection)
        };

        let result = delete_transaction_endpoint(
            State(state.clone()),
            Extension(other.id),
            Path((account.id, transaction.id)),
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound)));

        let connection = state.db_connection.lock().unwrap();
        assert!(get_transaction(transaction.id, account.id, &connection).is_ok());
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let (state, user, account, transaction) = get_test_state();

        let result = delete_transaction_endpoint(
            State(state.clone()),
            Extension(user.id),
            Path((account.id, transaction.id + 99)),
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
