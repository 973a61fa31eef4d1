//! The transaction model and its database queries.
//!
//! Amounts are stored as exact decimal strings and summed in Rust with
//! [rust_decimal::Decimal], so balances never pick up binary float error.

use rusqlite::{
    Connection, params,
    types::{FromSqlError, Type},
};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::{Date, OffsetDateTime};

use crate::{Error, account::AccountId, pagination, user::UserID};

pub type TransactionId = i64;

/// Whether a transaction adds to or subtracts from an account's balance.
///
/// The kind is fixed by which URL the transaction was recorded through and
/// can never be changed by form data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Look up a kind from the intent tag segment of a URL.
    ///
    /// Returns `None` for anything other than `re` or `ex`.
    pub fn from_intent_tag(tag: &str) -> Option<Self> {
        match tag {
            "re" => Some(Self::Income),
            "ex" => Some(Self::Expense),
            _ => None,
        }
    }

    /// The URL segment used when recording a transaction of this kind.
    pub fn intent_tag(self) -> &'static str {
        match self {
            Self::Income => "re",
            Self::Expense => "ex",
        }
    }

    /// The code stored in the database.
    pub fn as_db_code(self) -> &'static str {
        match self {
            Self::Income => "RE",
            Self::Expense => "EX",
        }
    }

    /// Look up a kind from the code stored in the database.
    pub fn from_db_code(code: &str) -> Option<Self> {
        match code {
            "RE" => Some(Self::Income),
            "EX" => Some(Self::Expense),
            _ => None,
        }
    }

    /// The label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

/// A single income or expense entry recorded against an account.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The id for the transaction.
    pub id: TransactionId,
    /// The account this transaction was recorded against.
    pub account_id: AccountId,
    /// Whether the amount counts toward or against the balance.
    pub kind: TransactionKind,
    /// The amount of money, always non-negative.
    pub amount: Decimal,
    /// A short free-form category, if given.
    pub category: Option<String>,
    /// A free-form description, if given.
    pub description: Option<String>,
    /// The day the transaction happened, stored in the Gregorian calendar.
    pub date: Date,
    /// When the row was inserted, used for display ordering.
    pub created_at: OffsetDateTime,
}

/// The fields needed to insert a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Date,
}

pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            account_id INTEGER NOT NULL,
            kind TEXT NOT NULL CHECK(kind IN ('RE', 'EX')),
            amount TEXT NOT NULL,
            category TEXT,
            description TEXT,
            date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY(account_id) REFERENCES account(id)
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_transaction(row: &rusqlite::Row) -> Result<Transaction, rusqlite::Error> {
    let raw_kind: String = row.get(2)?;
    let kind = TransactionKind::from_db_code(&raw_kind).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            Box::new(FromSqlError::InvalidType),
        )
    })?;

    let raw_amount: String = row.get(3)?;
    let amount = Decimal::from_str(&raw_amount).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        account_id: row.get(1)?,
        kind,
        amount,
        category: row.get(4)?,
        description: row.get(5)?,
        date: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const TRANSACTION_COLUMNS: &str =
    "id, account_id, kind, amount, category, description, date, created_at";

/// Insert a new transaction.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the insert failed.
pub fn create_transaction(
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO \"transaction\" (account_id, kind, amount, category, description, date, created_at) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            transaction.account_id,
            transaction.kind.as_db_code(),
            transaction.amount.to_string(),
            transaction.category,
            transaction.description,
            transaction.date,
            created_at,
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        account_id: transaction.account_id,
        kind: transaction.kind,
        amount: transaction.amount,
        category: transaction.category.clone(),
        description: transaction.description.clone(),
        date: transaction.date,
        created_at,
    })
}

/// Get the transaction with `transaction_id` recorded against `account_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the transaction does not exist or belongs to
/// a different account.
pub fn get_transaction(
    transaction_id: TransactionId,
    account_id: AccountId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = ?1 AND account_id = ?2"
        ))?
        .query_row(params![transaction_id, account_id], map_row_to_transaction)
        .map_err(|error| error.into())
}

/// Overwrite the amount, category, description, and date of the transaction
/// with `transaction_id` recorded against `account_id`.
///
/// The kind is deliberately not updatable.
///
/// # Errors
///
/// Returns [Error::NotFound] if the transaction does not exist or belongs to
/// a different account.
pub fn update_transaction(
    transaction_id: TransactionId,
    account_id: AccountId,
    amount: Decimal,
    category: Option<&str>,
    description: Option<&str>,
    date: Date,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_updated = connection.execute(
        "UPDATE \"transaction\" SET amount = ?1, category = ?2, description = ?3, date = ?4 \
        WHERE id = ?5 AND account_id = ?6",
        params![
            amount.to_string(),
            category,
            description,
            date,
            transaction_id,
            account_id
        ],
    )?;

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the transaction with `transaction_id` recorded against
/// `account_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the transaction does not exist or belongs to
/// a different account.
pub fn delete_transaction(
    transaction_id: TransactionId,
    account_id: AccountId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND account_id = ?2",
        params![transaction_id, account_id],
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Whether the transaction with `transaction_id` is recorded against any of
/// the accounts owned by `user_id`.
///
/// Used to tell a transaction reached through the wrong account's URL apart
/// from one that does not exist at all.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the query failed.
pub fn transaction_belongs_to_user(
    transaction_id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<bool, Error> {
    let count: u64 = connection.query_row(
        "SELECT COUNT(t.id) FROM \"transaction\" t \
        JOIN account a ON a.id = t.account_id \
        WHERE t.id = ?1 AND a.user_id = ?2",
        params![transaction_id, user_id.as_i64()],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}

/// The balance of an account: the sum of its income amounts minus the sum of
/// its expense amounts.
///
/// Amounts are summed in Rust as exact decimals rather than with SQL SUM,
/// which would coerce the stored strings to floats.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the query failed.
pub fn account_balance(account_id: AccountId, connection: &Connection) -> Result<Decimal, Error> {
    let rows = connection
        .prepare("SELECT kind, amount FROM \"transaction\" WHERE account_id = ?1")?
        .query_map(params![account_id], |row| {
            let raw_kind: String = row.get(0)?;
            let raw_amount: String = row.get(1)?;

            Ok((raw_kind, raw_amount))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut balance = Decimal::ZERO;
    for (raw_kind, raw_amount) in rows {
        let amount = Decimal::from_str(&raw_amount).map_err(|error| {
            Error::SqlError(rusqlite::Error::FromSqlConversionFailure(
                1,
                Type::Text,
                Box::new(error),
            ))
        })?;

        match TransactionKind::from_db_code(&raw_kind) {
            Some(TransactionKind::Income) => balance += amount,
            Some(TransactionKind::Expense) => balance -= amount,
            None => {
                return Err(Error::SqlError(rusqlite::Error::FromSqlConversionFailure(
                    0,
                    Type::Text,
                    Box::new(FromSqlError::InvalidType),
                )));
            }
        }
    }

    Ok(balance)
}

/// A transaction row joined with the name of the account it belongs to, for
/// the cross-account list page.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionWithAccount {
    pub transaction: Transaction,
    pub account_name: String,
}

/// One page of transactions.
#[derive(Debug, PartialEq)]
pub struct TransactionPage {
    /// The rows on the requested page, most recently recorded first.
    pub transactions: Vec<TransactionWithAccount>,
    /// The page that was actually returned, after clamping.
    pub page: u64,
    /// The total number of pages for this query.
    pub page_count: u64,
}

/// Get one page of all transactions across the accounts owned by `user_id`,
/// most recently recorded first.
///
/// When `search_query` is not empty, only transactions whose description
/// contains the query (case-insensitively) are returned.
///
/// # Errors
///
/// Returns an [Error::SqlError] if a query failed.
pub fn list_transactions_for_user(
    user_id: UserID,
    search_query: &str,
    page: u64,
    page_size: u64,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    let pattern = format!("%{}%", search_query.to_lowercase());

    let row_count: u64 = connection.query_row(
        "SELECT COUNT(t.id) FROM \"transaction\" t \
        JOIN account a ON a.id = t.account_id \
        WHERE a.user_id = ?1 AND lower(coalesce(t.description, '')) LIKE ?2",
        params![user_id.as_i64(), pattern],
        |row| row.get(0),
    )?;

    let page_count = pagination::page_count(row_count, page_size);
    let page = pagination::clamp_page(page, page_count);

    let transactions = connection
        .prepare(
            "SELECT t.id, t.account_id, t.kind, t.amount, t.category, t.description, \
                t.date, t.created_at, a.full_name \
            FROM \"transaction\" t \
            JOIN account a ON a.id = t.account_id \
            WHERE a.user_id = ?1 AND lower(coalesce(t.description, '')) LIKE ?2 \
            ORDER BY t.created_at DESC, t.id DESC LIMIT ?3 OFFSET ?4",
        )?
        .query_map(
            params![
                user_id.as_i64(),
                pattern,
                page_size,
                pagination::offset(page, page_size)
            ],
            |row| {
                Ok(TransactionWithAccount {
                    transaction: map_row_to_transaction(row)?,
                    account_name: row.get(8)?,
                })
            },
        )?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionPage {
        transactions,
        page,
        page_count,
    })
}

/// Get one page of the transactions recorded against `account_id`, most
/// recently recorded first.
///
/// # Errors
///
/// Returns an [Error::SqlError] if a query failed.
pub fn list_transactions_for_account(
    account_id: AccountId,
    page: u64,
    page_size: u64,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    let row_count: u64 = connection.query_row(
        "SELECT COUNT(id) FROM \"transaction\" WHERE account_id = ?1",
        params![account_id],
        |row| row.get(0),
    )?;

    let page_count = pagination::page_count(row_count, page_size);
    let page = pagination::clamp_page(page, page_count);

    let transactions = connection
        .prepare(
            "SELECT t.id, t.account_id, t.kind, t.amount, t.category, t.description, \
                t.date, t.created_at, a.full_name \
            FROM \"transaction\" t \
            JOIN account a ON a.id = t.account_id \
            WHERE t.account_id = ?1 \
            ORDER BY t.created_at DESC, t.id DESC LIMIT ?2 OFFSET ?3",
        )?
        .query_map(
            params![account_id, page_size, pagination::offset(page, page_size)],
            |row| {
                Ok(TransactionWithAccount {
                    transaction: map_row_to_transaction(row)?,
                    account_name: row.get(8)?,
                })
            },
        )?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionPage {
        transactions,
        page,
        page_count,
    })
}
