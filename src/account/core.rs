//! The account model and its database queries.
//!
//! Every query here is scoped to a user ID. A lookup for an account that
//! exists but belongs to someone else behaves exactly like a lookup for an
//! account that does not exist.

use rusqlite::{Connection, params};

use crate::{Error, pagination, user::UserID};

pub type AccountId = i64;

/// A person or organisation that the user records transactions against.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The display name of the account holder.
    pub full_name: String,
    /// Contact email for the account holder, if known.
    pub email: Option<String>,
    /// Contact phone number for the account holder, if known.
    pub phone_number: Option<String>,
    /// Postal address for the account holder, if known.
    pub address: Option<String>,
    /// The user that owns this account.
    pub user_id: UserID,
}

/// The fields needed to insert an account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub full_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub user_id: UserID,
}

pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT,
            phone_number TEXT,
            address TEXT,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id)
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_account(row: &rusqlite::Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        phone_number: row.get(3)?,
        address: row.get(4)?,
        user_id: UserID::new(row.get(5)?),
    })
}

/// Insert a new account.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the insert failed.
pub fn create_account(account: &NewAccount, connection: &Connection) -> Result<Account, Error> {
    connection.execute(
        "INSERT INTO account (full_name, email, phone_number, address, user_id) \
        VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            account.full_name,
            account.email,
            account.phone_number,
            account.address,
            account.user_id.as_i64()
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Account {
        id,
        full_name: account.full_name.clone(),
        email: account.email.clone(),
        phone_number: account.phone_number.clone(),
        address: account.address.clone(),
        user_id: account.user_id,
    })
}

/// Get the account with `account_id` owned by `user_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the account does not exist or belongs to a
/// different user.
pub fn get_account(
    account_id: AccountId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Account, Error> {
    connection
        .prepare(
            "SELECT id, full_name, email, phone_number, address, user_id \
            FROM account WHERE id = ?1 AND user_id = ?2",
        )?
        .query_row(params![account_id, user_id.as_i64()], map_row_to_account)
        .map_err(|error| error.into())
}

/// Overwrite the contact details of the account with `account_id` owned by
/// `user_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the account does not exist or belongs to a
/// different user.
pub fn update_account(
    account_id: AccountId,
    account: &NewAccount,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_updated = connection.execute(
        "UPDATE account SET full_name = ?1, email = ?2, phone_number = ?3, address = ?4 \
        WHERE id = ?5 AND user_id = ?6",
        params![
            account.full_name,
            account.email,
            account.phone_number,
            account.address,
            account_id,
            account.user_id.as_i64()
        ],
    )?;

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the account with `account_id` owned by `user_id`.
///
/// The caller is responsible for checking that the account has no
/// transactions first, see
/// [count_account_transactions].
///
/// # Errors
///
/// Returns [Error::NotFound] if the account does not exist or belongs to a
/// different user.
pub fn delete_account(
    account_id: AccountId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM account WHERE id = ?1 AND user_id = ?2",
        params![account_id, user_id.as_i64()],
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// The number of transactions recorded against the account with `account_id`.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the query failed.
pub fn count_account_transactions(
    account_id: AccountId,
    connection: &Connection,
) -> Result<u64, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM \"transaction\" WHERE account_id = ?1",
            params![account_id],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// One page of a user's accounts.
#[derive(Debug, PartialEq)]
pub struct AccountPage {
    /// The accounts on the requested page, most recently created first.
    pub accounts: Vec<Account>,
    /// The page that was actually returned, after clamping.
    pub page: u64,
    /// The total number of pages for this query.
    pub page_count: u64,
}

/// Get one page of the accounts owned by `user_id`, most recently created
/// first.
///
/// When `search_query` is not empty, only accounts whose name, address,
/// email, or phone number contains the query (case-insensitively) are
/// returned.
///
/// # Errors
///
/// Returns an [Error::SqlError] if a query failed.
pub fn list_accounts(
    user_id: UserID,
    search_query: &str,
    page: u64,
    page_size: u64,
    connection: &Connection,
) -> Result<AccountPage, Error> {
    let pattern = format!("%{}%", search_query.to_lowercase());

    let row_count: u64 = connection.query_row(
        "SELECT COUNT(id) FROM account \
        WHERE user_id = ?1 AND (lower(full_name) LIKE ?2 \
            OR lower(coalesce(address, '')) LIKE ?2 \
            OR lower(coalesce(email, '')) LIKE ?2 \
            OR lower(coalesce(phone_number, '')) LIKE ?2)",
        params![user_id.as_i64(), pattern],
        |row| row.get(0),
    )?;

    let page_count = pagination::page_count(row_count, page_size);
    let page = pagination::clamp_page(page, page_count);

    let accounts = connection
        .prepare(
            "SELECT id, full_name, email, phone_number, address, user_id FROM account \
            WHERE user_id = ?1 AND (lower(full_name) LIKE ?2 \
                OR lower(coalesce(address, '')) LIKE ?2 \
                OR lower(coalesce(email, '')) LIKE ?2 \
                OR lower(coalesce(phone_number, '')) LIKE ?2) \
            ORDER BY id DESC LIMIT ?3 OFFSET ?4",
            )?
        .query_map(
            params![
                user_id.as_i64(),
                pattern,
                page_size,
                pagination::offset(page, page_size)
            ],
            map_row_to_account,
        )?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AccountPage {
        accounts,
        page,
        page_count,
    })
}
