//! Defines the endpoint for saving changes to an account.

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
    account::{
        AccountId, edit_page::render_edit_account_page, form::AccountFormData, update_account,
    },
    alert::Notice,
    endpoints,
    user::UserID,
};

/// The state needed to update an account.
#[derive(Debug, Clone)]
pub struct EditAccountState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for saving changes to an account.
///
/// Redirects to the accounts view on success, otherwise re-renders the form
/// with validation messages. Returns the 404 page if the account does not
/// belong to the logged-in user.
pub async fn edit_account_endpoint(
    State(state): State<EditAccountState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<AccountId>,
    Form(form): Form<AccountFormData>,
) -> Result<Response, Error> {
    let updated_account = match form.validate(user_id) {
        Ok(updated_account) => updated_account,
        Err(errors) => {
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                render_edit_account_page(account_id, &form, &errors),
            )
                .into_response());
        }
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_account(account_id, &updated_account, &connection)?;

    Ok(Notice::AccountUpdated.redirect(endpoints::ACCOUNTS))
}
