//! The shared form for recording and editing transactions: its data,
//! validation, and markup.
//!
//! Note that the transaction kind is never part of the form data. It comes
//! from the URL when recording, and is left untouched when editing, so a
//! tampered form body cannot flip income to expense.

use maud::{Markup, html};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::{
    Error,
    account::AccountId,
    html::{BUTTON_PRIMARY_STYLE, text_input},
    jalali::{format_jalali, parse_jalali},
    transaction::{NewTransaction, Transaction, TransactionKind},
};

/// The raw form data for recording or editing a transaction.
///
/// Dates are entered in the Jalali calendar, e.g. `1402/07/18`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionFormData {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// Validation messages to render next to the form fields.
#[derive(Debug, Default, PartialEq)]
pub struct TransactionFormErrors {
    pub amount: Option<&'static str>,
    pub date: Option<&'static str>,
}

impl TransactionFormData {
    /// Check the form data and convert it into a [NewTransaction] against
    /// `account_id` with the given `kind`.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages to re-render the form with.
    pub fn validate(
        &self,
        account_id: AccountId,
        kind: TransactionKind,
    ) -> Result<NewTransaction, TransactionFormErrors> {
        let mut errors = TransactionFormErrors::default();

        let amount = match Decimal::from_str(self.amount.trim()) {
            Ok(amount) if amount.is_sign_negative() => {
                errors.amount = Some("Enter an amount of zero or more.");
                None
            }
            Ok(amount) => Some(amount),
            Err(_) => {
                errors.amount = Some("Enter an amount, e.g. 150.00.");
                None
            }
        };

        let date = match parse_jalali(self.date.trim()) {
            Ok(date) => Some(date),
            Err(Error::InvalidDateFormat(_)) => {
                errors.date = Some("Enter a date like 1402/07/18.");
                None
            }
            Err(_) => {
                errors.date = Some("That date does not exist in the Jalali calendar.");
                None
            }
        };

        let (Some(amount), Some(date)) = (amount, date) else {
            return Err(errors);
        };

        let optional = |field: &str| {
            let field = field.trim();
            (!field.is_empty()).then(|| field.to_owned())
        };

        Ok(NewTransaction {
            account_id,
            kind,
            amount,
            category: optional(&self.category),
            description: optional(&self.description),
            date,
        })
    }
}

/// The transaction form, posting to `action`.
///
/// Used by both the record and edit pages; they differ only in the URL, the
/// pre-filled values, and the button label.
pub fn transaction_form(
    action: &str,
    data: &TransactionFormData,
    errors: &TransactionFormErrors,
    submit_label: &str,
) -> Markup {
    html! {
        form method="post" action=(action) class="w-full max-w-md space-y-4"
        {
            (text_input("Amount", "amount", &data.amount, true, errors.amount))
            (text_input("Date (Jalali)", "date", &data.date, true, errors.date))
            (text_input("Category", "category", &data.category, false, None))
            (text_input("Description", "description", &data.description, false, None))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}

impl From<&Transaction> for TransactionFormData {
    fn from(transaction: &Transaction) -> Self {
        Self {
            amount: transaction.amount.to_string(),
            date: format_jalali(transaction.date),
            category: transaction.category.clone().unwrap_or_default(),
            description: transaction.description.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod transaction_form_tests {
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::transaction::TransactionKind;

    use super::TransactionFormData;

    #[test]
    fn valid_form_becomes_new_transaction() {
        let data = TransactionFormData {
            amount: "150.00".to_owned(),
            date: "1402/07/18".to_owned(),
            category: "rent".to_owned(),
            description: "".to_owned(),
        };

        let transaction = data.validate(1, TransactionKind::Expense).unwrap();

        assert_eq!(transaction.account_id, 1);
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.amount, Decimal::new(15000, 2));
        assert_eq!(transaction.date, date!(2023 - 10 - 10));
        assert_eq!(transaction.category, Some("rent".to_owned()));
        assert_eq!(transaction.description, None);
    }

    #[test]
    fn unparseable_amount_is_rejected() {
        let data = TransactionFormData {
            amount: "lots".to_owned(),
            date: "1402/07/18".to_owned(),
            ..Default::default()
        };

        let errors = data.validate(1, TransactionKind::Income).unwrap_err();

        assert!(errors.amount.is_some());
        assert!(errors.date.is_none());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let data = TransactionFormData {
            amount: "-10.00".to_owned(),
            date: "1402/07/18".to_owned(),
            ..Default::default()
        };

        let errors = data.validate(1, TransactionKind::Income).unwrap_err();

        assert!(errors.amount.is_some());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let data = TransactionFormData {
            amount: "10.00".to_owned(),
            date: "18/07/1402".to_owned(),
            ..Default::default()
        };

        let errors = data.validate(1, TransactionKind::Income).unwrap_err();

        assert_eq!(errors.date, Some("Enter a date like 1402/07/18."));
    }

    #[test]
    fn nonexistent_date_is_rejected() {
        let data = TransactionFormData {
            amount: "10.00".to_owned(),
            // 1402 is not a leap year, so Esfand has 29 days.
            date: "1402/12/30".to_owned(),
            ..Default::default()
        };

        let errors = data.validate(1, TransactionKind::Income).unwrap_err();

        assert_eq!(
            errors.date,
            Some("That date does not exist in the Jalali calendar.")
        );
    }

    #[test]
    fn all_errors_reported_at_once() {
        let data = TransactionFormData::default();

        let errors = data.validate(1, TransactionKind::Income).unwrap_err();

        assert!(errors.amount.is_some());
        assert!(errors.date.is_some());
    }

    #[test]
    fn prefill_uses_jalali_date() {
        let connection = crate::test_utils::get_test_connection();
        let user = crate::test_utils::insert_test_user("hello@example.com", &connection);
        let account = crate::test_utils::insert_test_account("Sara Rostami", &user, &connection);
        let transaction = crate::transaction::create_transaction(
            &crate::transaction::NewTransaction {
                account_id: account.id,
                kind: TransactionKind::Income,
                amount: Decimal::new(15000, 2),
                category: None,
                description: Some("consulting".to_owned()),
                date: date!(2023 - 10 - 10),
            },
            &connection,
        )
        .unwrap();

        let data = TransactionFormData::from(&transaction);

        assert_eq!(data.amount, "150.00");
        assert_eq!(data.date, "1402/07/18");
        assert_eq!(data.description, "consulting");
    }
}
