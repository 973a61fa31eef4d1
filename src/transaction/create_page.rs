//! Defines the route handler for the page for recording a transaction.
//!
//! The URL fixes whether income or expense is being recorded, so the page
//! has no kind selector.

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
    endpoints::{self, format_new_transaction_endpoint},
    html::{PAGE_CONTAINER_STYLE, base},
    jalali::today_jalali,
    navigation::NavBar,
    transaction::{
        TransactionKind,
        form::{TransactionFormData, TransactionFormErrors, transaction_form},
    },
    user::UserID,
};

/// The state needed for the record transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for recording an income or expense transaction.
///
/// An unrecognised kind segment redirects to the transactions view with a
/// warning notice. Returns the 404 page if the account does not belong to
/// the logged-in user.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
    Extension(user_id): Extension<UserID>,
    Path((account_id, kind_tag)): Path<(AccountId, String)>,
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

    // Pre-fill the date with today so most entries only need an amount.
    let data = TransactionFormData {
        date: today_jalali(),
        ..Default::default()
    };

    Ok(render_create_transaction_page(
        account_id,
        &account.full_name,
        kind,
        &data,
        &TransactionFormErrors::default(),
    )
    .into_response())
}

/// The record transaction page, re-rendered with `data` and `errors` after a
/// failed submission.
pub(super) fn render_create_transaction_page(
    account_id: AccountId,
    account_name: &str,
    kind: TransactionKind,
    data: &TransactionFormData,
    errors: &TransactionFormErrors,
) -> maud::Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS).into_html();
    let action = format_new_transaction_endpoint(account_id, kind.intent_tag());
    let title = format!("Record {}", kind.label());

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-md"
            {
                h1 class="text-xl font-bold" { (title) " for " (account_name) }

                (transaction_form(&action, data, errors, "Save transaction"))
            }
        }
    );

    base(&title, &content)
}

#[cfg(test)]
mod create_transaction_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
    };

    use crate::{
        Error,
        test_utils::{
            assert_form_action, assert_form_input, assert_form_submit_button, assert_redirects_to,
            assert_valid_html, get_test_connection, insert_test_account, insert_test_user,
            must_get_form, parse_html_document,
        },
    };

    use super::{CreateTransactionPageState, get_create_transaction_page};

    #[tokio::test]
    async fn renders_transaction_form() {
        let connection = get_test_connection();
        let user = insert_test_user("hello@example.com", &connection);
        let account = insert_test_account("Sara Rostami", &user, &connection);
        let state = CreateTransactionPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_create_transaction_page(
            State(state),
            Extension(user.id),
            Path((account.id, "re".to_owned())),
        )
        .await
        .unwrap();

        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_form_action(&form, &format!("/accounts/{}/transactions/new/re", account.id));
        assert_form_input(&form, "amount", "text", true);
        assert_form_input(&form, "date", "text", true);
        assert_form_input(&form, "category", "text", false);
        assert_form_input(&form, "description", "text", false);
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn unknown_kind_redirects_with_notice() {
        let connection = get_test_connection();
        let user = insert_test_user("hello@example.com", &connection);
        let account = insert_test_account("Sara Rostami", &user, &connection);
        let state = CreateTransactionPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_create_transaction_page(
            State(state),
            Extension(user.id),
            Path((account.id, "gift".to_owned())),
        )
        .await
        .unwrap();

        assert_redirects_to(&response, "/transactions?notice=unknown_transaction_kind");
    }

    #[tokio::test]
    async fn other_users_account_is_not_found() {
        let connection = get_test_connection();
        let owner = insert_test_user("owner@example.com", &connection);
        let other = insert_test_user("other@example.com", &connection);
        let account = insert_test_account("Sara Rostami", &owner, &connection);
        let state = CreateTransactionPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let result = get_create_transaction_page(
            State(state),
            Extension(other.id),
            Path((account.id, "ex".to_owned())),
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
