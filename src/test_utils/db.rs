use rusqlite::Connection;

use crate::{
    PasswordHash,
    account::{Account, NewAccount, create_account},
    db::initialize,
    user::{User, create_user},
};

/// An in-memory database with the application schema applied.
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not create in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

pub(crate) fn insert_test_user(email: &str, connection: &Connection) -> User {
    create_user(email, PasswordHash::new_unchecked("hunter2"), connection)
        .expect("Could not insert test user")
}

pub(crate) fn insert_test_account(full_name: &str, user: &User, connection: &Connection) -> Account {
    create_account(
        &NewAccount {
            full_name: full_name.to_owned(),
            email: None,
            phone_number: None,
            address: None,
            user_id: user.id,
        },
        connection,
    )
    .expect("Could not insert test account")
}
