//! Defines the route handler for the page for creating an account.

use axum::response::{IntoResponse, Response};
use maud::html;

use crate::{
    account::form::{AccountFormData, AccountFormErrors, account_form},
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// Renders the page for creating an account.
pub async fn get_create_account_page() -> Response {
    render_create_account_page(&AccountFormData::default(), &AccountFormErrors::default())
        .into_response()
}

/// The create account page, re-rendered with `data` and `errors` after a
/// failed submission.
pub(super) fn render_create_account_page(
    data: &AccountFormData,
    errors: &AccountFormErrors,
) -> maud::Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-md"
            {
                h1 class="text-xl font-bold" { "New Account" }

                (account_form(endpoints::NEW_ACCOUNT_VIEW, data, errors, "Create account"))
            }
        }
    );

    base("New Account", &content)
}
