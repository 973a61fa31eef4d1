//! The fallback page for routes that do not exist.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The fallback route handler.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// The 404 page as a [Response], for use outside of a route handler.
pub(crate) fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "There's nothing here.",
            "The page may have moved, or the link may be broken.",
        ),
    )
        .into_response()
}
