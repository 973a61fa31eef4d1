//! Accounts: the people and organisations the user keeps a ledger for.

mod accounts_page;
mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod delete_page;
mod detail_page;
mod edit_endpoint;
mod edit_page;
mod form;

pub use accounts_page::get_accounts_page;
pub use core::{
    Account, AccountId, NewAccount, count_account_transactions, create_account,
    create_account_table, delete_account, get_account, list_accounts, map_row_to_account,
    update_account,
};
pub use create_endpoint::create_account_endpoint;
pub use create_page::get_create_account_page;
pub use delete_endpoint::delete_account_endpoint;
pub use delete_page::get_delete_account_page;
pub use detail_page::get_account_detail_page;
pub use edit_endpoint::edit_account_endpoint;
pub use edit_page::get_edit_account_page;

pub(crate) use form::AccountFormData;
