//! Notice system for displaying one-shot success and warning messages.
//!
//! Endpoints that redirect after a write append a `notice` query parameter to
//! the target URL. The list pages look the code up with [Notice::from_code]
//! and render a banner; unknown codes are silently ignored so a tampered URL
//! degrades to no banner rather than an error.

use axum::response::{IntoResponse, Redirect, Response};
use maud::{Markup, html};

/// A one-shot message shown at the top of a list page after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// An account was created.
    AccountCreated,
    /// An account was updated.
    AccountUpdated,
    /// An account was deleted.
    AccountDeleted,
    /// The account still has transactions recorded against it, so it was not
    /// deleted.
    AccountHasTransactions,
    /// A transaction was recorded.
    TransactionCreated,
    /// A transaction was updated.
    TransactionUpdated,
    /// A transaction was deleted.
    TransactionDeleted,
    /// The transaction exists but belongs to a different account than the one
    /// in the URL.
    TransactionAccountMismatch,
    /// The transaction kind segment of the URL was neither `re` nor `ex`.
    UnknownTransactionKind,
}

impl Notice {
    /// Look up a notice by the code carried in the query string.
    ///
    /// Returns `None` for codes this application never produces.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "account_created" => Some(Self::AccountCreated),
            "account_updated" => Some(Self::AccountUpdated),
            "account_deleted" => Some(Self::AccountDeleted),
            "account_has_transactions" => Some(Self::AccountHasTransactions),
            "transaction_created" => Some(Self::TransactionCreated),
            "transaction_updated" => Some(Self::TransactionUpdated),
            "transaction_deleted" => Some(Self::TransactionDeleted),
            "transaction_account_mismatch" => Some(Self::TransactionAccountMismatch),
            "unknown_transaction_kind" => Some(Self::UnknownTransactionKind),
            _ => None,
        }
    }

    /// The code carried in the query string.
    pub fn code(self) -> &'static str {
        match self {
            Self::AccountCreated => "account_created",
            Self::AccountUpdated => "account_updated",
            Self::AccountDeleted => "account_deleted",
            Self::AccountHasTransactions => "account_has_transactions",
            Self::TransactionCreated => "transaction_created",
            Self::TransactionUpdated => "transaction_updated",
            Self::TransactionDeleted => "transaction_deleted",
            Self::TransactionAccountMismatch => "transaction_account_mismatch",
            Self::UnknownTransactionKind => "unknown_transaction_kind",
        }
    }

    /// The message shown in the banner.
    pub fn message(self) -> &'static str {
        match self {
            Self::AccountCreated => "The account was created.",
            Self::AccountUpdated => "The account was updated.",
            Self::AccountDeleted => "The account was deleted.",
            Self::AccountHasTransactions => {
                "The account still has transactions, so it was not deleted. \
                Delete its transactions first."
            }
            Self::TransactionCreated => "The transaction was recorded.",
            Self::TransactionUpdated => "The transaction was updated.",
            Self::TransactionDeleted => "The transaction was deleted.",
            Self::TransactionAccountMismatch => {
                "That transaction does not belong to the requested account."
            }
            Self::UnknownTransactionKind => "Transactions must be recorded as income or expense.",
        }
    }

    /// Whether the banner should be styled as a warning instead of a success.
    pub fn is_warning(self) -> bool {
        matches!(
            self,
            Self::AccountHasTransactions
                | Self::TransactionAccountMismatch
                | Self::UnknownTransactionKind
        )
    }

    /// Render the banner for this notice.
    pub fn banner(self) -> Markup {
        let style = if self.is_warning() {
            "w-full max-w-2xl mb-4 p-4 text-sm rounded-lg bg-yellow-50 \
            text-yellow-800 dark:bg-gray-800 dark:text-yellow-300"
        } else {
            "w-full max-w-2xl mb-4 p-4 text-sm rounded-lg bg-green-50 \
            text-green-800 dark:bg-gray-800 dark:text-green-400"
        };

        html! {
            div class=(style) role="alert" { (self.message()) }
        }
    }

    /// A redirect to `target` carrying this notice in the query string.
    pub fn redirect(self, target: &str) -> Response {
        let separator = if target.contains('?') { '&' } else { '?' };

        Redirect::to(&format!("{target}{separator}notice={}", self.code())).into_response()
    }
}

#[cfg(test)]
mod notice_tests {
    use scraper::{Html, Selector};

    use crate::test_utils::assert_redirects_to;

    use super::Notice;

    #[test]
    fn codes_round_trip() {
        let notices = [
            Notice::AccountCreated,
            Notice::AccountUpdated,
            Notice::AccountDeleted,
            Notice::AccountHasTransactions,
            Notice::TransactionCreated,
            Notice::TransactionUpdated,
            Notice::TransactionDeleted,
            Notice::TransactionAccountMismatch,
            Notice::UnknownTransactionKind,
        ];

        for notice in notices {
            assert_eq!(Notice::from_code(notice.code()), Some(notice));
        }
    }

    #[test]
    fn unknown_code_is_ignored() {
        assert_eq!(Notice::from_code("made_up_code"), None);
        assert_eq!(Notice::from_code(""), None);
    }

    #[test]
    fn banner_has_alert_role() {
        let markup = Notice::AccountCreated.banner();
        let document = Html::parse_fragment(&markup.into_string());
        let alert_selector = Selector::parse("div[role=alert]").unwrap();

        assert!(document.select(&alert_selector).next().is_some());
    }

    #[test]
    fn redirect_appends_notice_code() {
        let response = Notice::AccountDeleted.redirect("/accounts");

        assert_redirects_to(&response, "/accounts?notice=account_deleted");
    }

    #[test]
    fn redirect_appends_to_existing_query() {
        let response = Notice::TransactionCreated.redirect("/accounts/1/transactions?page=2");

        assert_redirects_to(
            &response,
            "/accounts/1/transactions?page=2&notice=transaction_created",
        );
    }
}
