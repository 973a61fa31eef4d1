//! Defines the route handler for the page for editing a transaction.

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
    endpoints::{self, format_transaction_endpoint},
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    transaction::{
        TransactionId, TransactionKind, get_transaction,
        form::{TransactionFormData, TransactionFormErrors, transaction_form},
    },
    user::UserID,
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing a transaction, pre-filled with its current
/// values.
///
/// Returns the 404 page if the account does not belong to the logged-in
/// user, or the transaction does not belong to the account.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Extension(user_id): Extension<UserID>,
    Path((account_id, transaction_id)): Path<(AccountId, TransactionId)>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_account(account_id, user_id, &connection)?;
    let transaction = get_transaction(transaction_id, account_id, &connection)?;

    Ok(render_edit_transaction_page(
        account_id,
        transaction_id,
        transaction.kind,
        &TransactionFormData::from(&transaction),
        &TransactionFormErrors::default(),
    )
    .into_response())
}

/// The edit transaction page, re-rendered with `data` and `errors` after a
/// failed submission.
pub(super) fn render_edit_transaction_page(
    account_id: AccountId,
    transaction_id: TransactionId,
    kind: TransactionKind,
    data: &TransactionFormData,
    errors: &TransactionFormErrors,
) -> maud::Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let action =
        format_transaction_endpoint(endpoints::EDIT_TRANSACTION_VIEW, account_id, transaction_id);
    let title = format!("Edit {}", kind.label());

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-md"
            {
                h1 class="text-xl font-bold" { (title) }

                (transaction_form(&action, data, errors, "Save changes"))
            }
        }
    );

    base(&title, &content)
}

#[cfg(test)]
mod edit_transaction_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
    };
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        Error,
        test_utils::{
            assert_form_action, assert_form_input_with_value, assert_valid_html,
            get_test_connection, insert_test_account, insert_test_user, must_get_form,
            parse_html_document,
        },
        transaction::{NewTransaction, TransactionKind, create_transaction},
    };

    use super::{EditTransactionPageState, get_edit_transaction_page};

    #[tokio::test]
    async fn form_is_prefilled_with_jalali_date() {
        let connection = get_test_connection();
        let user = insert_test_user("hello@example.com", &connection);
        let account = insert_test_account("Sara Rostami", &user, &connection);
        let transaction = create_transaction(
            &NewTransaction {
                account_id: account.id,
                kind: TransactionKind::Expense,
                amount: Decimal::new(15000, 2),
                category: Some("rent".to_owned()),
                description: None,
                date: date!(2023 - 10 - 10),
            },
            &connection,
        )
        .unwrap();
        let state = EditTransactionPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_edit_transaction_page(
            State(state),
            Extension(user.id),
            Path((account.id, transaction.id)),
        )
        .await
        .unwrap();

        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_form_action(
            &form,
            &format!("/accounts/{}/transactions/{}/edit", account.id, transaction.id),
        );
        assert_form_input_with_value(&form, "amount", "text", "150.00");
        assert_form_input_with_value(&form, "date", "text", "1402/07/18");
        assert_form_input_with_value(&form, "category", "text", "rent");
    }

    #[tokio::test]
    async fn other_users_account_is_not_found() {
        let connection = get_test_connection();
        let owner = insert_test_user("owner@example.com", &connection);
        let other = insert_test_user("other@example.com", &connection);
        let account = insert_test_account("Sara Rostami", &owner, &connection);
        let transaction = create_transaction(
            &NewTransaction {
                account_id: account.id,
                kind: TransactionKind::Income,
                amount: Decimal::new(100, 0),
                category: None,
                description: None,
                date: date!(2023 - 10 - 10),
            },
            &connection,
        )
        .unwrap();
        let state = EditTransactionPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let result = get_edit_transaction_page(
            State(state),
            Extension(other.id),
            Path((account.id, transaction.id)),
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn transaction_of_other_account_is_not_found() {
        let connection = get_test_connection();
        let user = insert_test_user("hello@example.com", &connection);
        let account = insert_test_account("Sara Rostami", &user, &connection);
        let other_account = insert_test_account("Omid Karimi", &user, &connection);
        let transaction = create_transaction(
            &NewTransaction {
                account_id: account.id,
                kind: TransactionKind::Income,
                amount: Decimal::new(100, 0),
                category: None,
                description: None,
                date: date!(2023 - 10 - 10),
            },
            &connection,
        )
        .unwrap();
        let state = EditTransactionPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let result = get_edit_transaction_page(
            State(state),
            Extension(user.id),
            Path((other_account.id, transaction.id)),
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
