//! This file defines the routes for displaying the log-in page and handling
//! log-in requests. The auth module handles the lower level authentication
//! and cookie logic.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error,
    auth::cookie::set_auth_cookie,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, link, log_in_register, password_input, text_input},
    user::get_user_by_email,
};

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect email or password.";

/// The state needed to perform a log-in.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The query parameters accepted by the log-in page.
#[derive(Debug, Default, Deserialize)]
pub struct LogInQuery {
    /// Where to send the user after a successful log-in, set by the auth
    /// middleware when an unauthenticated request is bounced here.
    pub redirect_url: Option<String>,
}

/// The raw data entered by the user in the log-in form.
///
/// The email and password are stored as plain strings. There is no need for
/// validation here since they will be compared against the email and password
/// in the database, which have been verified.
#[derive(Clone, Deserialize)]
pub struct LogInData {
    /// Email entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
    /// Where to send the user after a successful log-in.
    pub redirect_url: Option<String>,
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<LogInQuery>) -> Response {
    render_log_in_page("", query.redirect_url.as_deref(), None).into_response()
}

fn render_log_in_page(
    email_value: &str,
    redirect_url: Option<&str>,
    error_message: Option<&str>,
) -> Markup {
    let form = html!(
        form method="post" action=(endpoints::LOG_IN_API) class="space-y-4 md:space-y-6"
        {
            (text_input("Email", "email", email_value, true, None))
            (password_input(0, error_message))

            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Log in" }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Don't have an account yet? "
                (link(endpoints::REGISTER_VIEW, "Register here"))
            }
        }
    );

    base("Log In", &log_in_register("Log in to your ledger", &form))
}

/// Only ever send the user to a path on this site after log-in. An absolute
/// URL in the redirect parameter is ignored.
fn safe_redirect_target(redirect_url: Option<&str>) -> &str {
    match redirect_url {
        Some(url) if url.starts_with('/') && !url.starts_with("//") => url,
        _ => endpoints::ACCOUNTS,
    }
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in the auth cookie is set and the client is
/// redirected to the page it originally asked for, or the accounts page.
/// Otherwise, the form is returned with an error message explaining the
/// problem.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = match get_user_by_email(&user_data.email, &connection) {
        Ok(user) => user,
        Err(Error::NotFound) => {
            return Ok(log_in_error_response(&user_data));
        }
        Err(error) => return Err(error),
    };

    let is_password_valid = user
        .password_hash
        .verify(&user_data.password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !is_password_valid {
        return Ok(log_in_error_response(&user_data));
    }

    let jar = set_auth_cookie(jar, user.id, state.cookie_duration)
        .inspect_err(|error| tracing::error!("could not set auth cookie: {error}"))?;
    let target = safe_redirect_target(user_data.redirect_url.as_deref());

    Ok((jar, Redirect::to(target)).into_response())
}

fn log_in_error_response(user_data: &LogInData) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        render_log_in_page(
            &user_data.email,
            user_data.redirect_url.as_deref(),
            Some(INVALID_CREDENTIALS_ERROR_MSG),
        ),
    )
        .into_response()
}
