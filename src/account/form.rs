//! The shared form for creating and editing accounts: its data, validation,
//! and markup.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    account::NewAccount,
    email::is_valid_email,
    html::{BUTTON_PRIMARY_STYLE, text_input},
    user::UserID,
};

/// The raw form data for creating or editing an account.
///
/// Browsers submit empty strings for fields the user left blank, so every
/// field is a [String] here and [AccountFormData::validate] decides which
/// become `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountFormData {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
}

/// Validation messages to render next to the form fields.
#[derive(Debug, Default, PartialEq)]
pub struct AccountFormErrors {
    pub full_name: Option<&'static str>,
    pub email: Option<&'static str>,
}

impl AccountFormData {
    /// Check the form data and convert it into a [NewAccount] owned by
    /// `user_id`.
    ///
    /// Whitespace-only fields count as blank, and blank optional fields
    /// become `None`.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages to re-render the form with.
    pub fn validate(&self, user_id: UserID) -> Result<NewAccount, AccountFormErrors> {
        let mut errors = AccountFormErrors::default();

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            errors.full_name = Some("Enter the account holder's name.");
        }

        let email = self.email.trim();
        if !email.is_empty() && !is_valid_email(email) {
            errors.email = Some("Enter a valid email address, or leave this blank.");
        }

        if errors != AccountFormErrors::default() {
            return Err(errors);
        }

        let optional = |field: &str| {
            let field = field.trim();
            (!field.is_empty()).then(|| field.to_owned())
        };

        Ok(NewAccount {
            full_name: full_name.to_owned(),
            email: optional(&self.email),
            phone_number: optional(&self.phone_number),
            address: optional(&self.address),
            user_id,
        })
    }
}

/// The account form, posting to `action`.
///
/// Used by both the create and edit pages; they differ only in the URL, the
/// pre-filled values, and the button label.
pub fn account_form(
    action: &str,
    data: &AccountFormData,
    errors: &AccountFormErrors,
    submit_label: &str,
) -> Markup {
    html! {
        form method="post" action=(action) class="w-full max-w-md space-y-4"
        {
            (text_input("Full name", "full_name", &data.full_name, true, errors.full_name))
            (text_input("Email", "email", &data.email, false, errors.email))
            (text_input("Phone number", "phone_number", &data.phone_number, false, None))
            (text_input("Address", "address", &data.address, false, None))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}

impl From<&crate::account::Account> for AccountFormData {
    fn from(account: &crate::account::Account) -> Self {
        Self {
            full_name: account.full_name.clone(),
            email: account.email.clone().unwrap_or_default(),
            phone_number: account.phone_number.clone().unwrap_or_default(),
            address: account.address.clone().unwrap_or_default(),
        }
    }
}
