//! This file defines the registration page and the endpoint that creates
//! users.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
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
    email::is_valid_email,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, link, log_in_register, password_input, text_input},
    password::{PasswordHash, ValidatedPassword},
    user::create_user,
};

/// The minimum password length communicated to the browser.
///
/// The real strength check happens server-side; this only stops the most
/// hopeless passwords before a round-trip.
const PASSWORD_INPUT_MIN_LENGTH: u8 = 8;

const INVALID_EMAIL_ERROR_MSG: &str = "Enter a valid email address.";
const DUPLICATE_EMAIL_ERROR_MSG: &str = "This email address is already registered.";

/// The state needed to register a user.
#[derive(Debug, Clone)]
pub struct RegisterState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegisterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<RegisterState> for Key {
    fn from_ref(state: &RegisterState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered by the user in the registration form.
#[derive(Clone, Deserialize)]
pub struct RegisterFormData {
    /// The email to register the new user under.
    pub email: String,
    /// The new user's plain-text password.
    pub password: String,
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    render_register_page("", None, None).into_response()
}

fn render_register_page(
    email_value: &str,
    email_error: Option<&str>,
    password_error: Option<&str>,
) -> Markup {
    let form = html!(
        form method="post" action=(endpoints::USERS) class="space-y-4 md:space-y-6"
        {
            (text_input("Email", "email", email_value, true, email_error))
            (password_input(PASSWORD_INPUT_MIN_LENGTH, password_error))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Register" }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                (link(endpoints::LOG_IN_VIEW, "Log in here"))
            }
        }
    );

    base("Register", &log_in_register("Create an account", &form))
}

/// Handler for registration requests via the POST method.
///
/// On success the new user is logged in straight away and redirected to the
/// accounts page. Otherwise, the form is returned with an error message
/// explaining the problem.
pub async fn create_user_endpoint(
    State(state): State<RegisterState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterFormData>,
) -> Result<Response, Error> {
    let email = form.email.trim();
    if !is_valid_email(email) {
        return Ok(register_error_response(
            email,
            Some(INVALID_EMAIL_ERROR_MSG),
            None,
        ));
    }

    let validated_password = match ValidatedPassword::new(&form.password) {
        Ok(validated_password) => validated_password,
        Err(Error::TooWeak(feedback)) => {
            return Ok(register_error_response(email, None, Some(&feedback)));
        }
        Err(error) => return Err(error),
    };

    let password_hash = PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = match create_user(email, password_hash, &connection) {
        Ok(user) => user,
        Err(Error::DuplicateEmail) => {
            return Ok(register_error_response(
                email,
                Some(DUPLICATE_EMAIL_ERROR_MSG),
                None,
            ));
        }
        Err(error) => return Err(error),
    };

    let jar = set_auth_cookie(jar, user.id, state.cookie_duration)
        .inspect_err(|error| tracing::error!("could not set auth cookie: {error}"))?;

    Ok((jar, Redirect::to(endpoints::ACCOUNTS)).into_response())
}

fn register_error_response(
    email_value: &str,
    email_error: Option<&str>,
    password_error: Option<&str>,
) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        render_register_page(email_value, email_error, password_error),
    )
        .into_response()
}
