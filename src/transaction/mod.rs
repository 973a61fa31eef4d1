//! Transactions: the income and expense entries recorded against accounts.

mod account_transactions_page;
mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod delete_page;
mod edit_endpoint;
mod edit_page;
mod form;
mod transactions_page;

pub use account_transactions_page::get_account_transactions_page;
pub use core::{
    NewTransaction, Transaction, TransactionId, TransactionKind, TransactionPage,
    TransactionWithAccount, account_balance, create_transaction, create_transaction_table,
    delete_transaction, get_transaction, list_transactions_for_account,
    list_transactions_for_user, transaction_belongs_to_user, update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use delete_page::get_delete_transaction_page;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use transactions_page::get_transactions_page;
