//! Defines the endpoint for creating a new account.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{create_account, create_page::render_create_account_page, form::AccountFormData},
    alert::Notice,
    endpoints,
    user::UserID,
};

/// The state needed to create an account.
#[derive(Debug, Clone)]
pub struct CreateAccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new account.
///
/// Redirects to the accounts view on success, otherwise re-renders the form
/// with validation messages.
pub async fn create_account_endpoint(
    State(state): State<CreateAccountState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<AccountFormData>,
) -> Result<Response, Error> {
    let new_account = match form.validate(user_id) {
        Ok(new_account) => new_account,
        Err(errors) => {
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                render_create_account_page(&form, &errors),
            )
                .into_response());
        }
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    create_account(&new_account, &connection)
        .inspect_err(|error| tracing::error!("could not create account: {error}"))?;

    Ok(Notice::AccountCreated.redirect(endpoints::ACCOUNTS))
}
