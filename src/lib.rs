//! Daftar is a web app for keeping a small personal ledger: named accounts
//! with income and expense transactions recorded against them, entered in the
//! Jalali calendar.
//!
//! This library serves HTML pages directly; there is no JSON API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod account;
mod alert;
mod app_state;
mod auth;
mod db;
mod email;
mod endpoints;
mod html;
mod jalali;
mod log_in;
mod log_out;
mod navigation;
mod not_found;
mod pagination;
mod password;
mod register_user;
mod routing;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use pagination::PaginationConfig;
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{User, UserID, get_user_by_id};

use crate::not_found::get_404_not_found_response;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an email/password combination that does not match a
    /// registered user, or the auth cookie contents could not be trusted.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The auth token cookie is missing from the cookie jar in the request.
    #[error("no auth cookie in the cookie jar")]
    CookieMissing,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred in the underlying hashing library.
    ///
    /// The error string should only be logged on the server, not shown to the
    /// client.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A value could not be serialized as JSON (e.g. the auth token cookie).
    #[error("could not serialize as JSON: {0}")]
    JsonError(String),

    /// A date string did not match the strict `YYYY/MM/DD` (or `YYYY-MM-DD`)
    /// pattern.
    #[error("dates must use the format YYYY/MM/DD, got \"{0}\"")]
    InvalidDateFormat(String),

    /// A date string matched the pattern but its components do not form a
    /// real date in the Jalali calendar.
    #[error("\"{0}\" is not a valid date in the Jalali calendar")]
    InvalidDate(String),

    /// The email used to register already belongs to a user.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// The requested resource was not found, or is owned by another user.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                html::get_internal_server_error_response()
            }
        }
    }
}
