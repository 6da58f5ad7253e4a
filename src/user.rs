//! Code for creating the user table and counting users by role.
//!
//! Users are managed outside of this application, so the only operations here
//! are creating the table, inserting users for seeding and tests, and the
//! read-only [UserStore] used by the dashboard.

use std::{
    fmt::Display,
    str::FromStr,
    sync::{Arc, Mutex},
};

use rusqlite::{
    Connection, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// What a user does on the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Someone enrolled in courses.
    Student,
    /// Someone who teaches courses.
    Instructor,
    /// Someone who runs the platform.
    Admin,
}

impl UserRole {
    /// The role as it is stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Instructor => "instructor",
            UserRole::Admin => "admin",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "instructor" => Ok(UserRole::Instructor),
            "admin" => Ok(UserRole::Admin),
            other => Err(Error::InvalidStoredValue(other.to_owned())),
        }
    }
}

impl ToSql for UserRole {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for UserRole {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A user of the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// What the user does on the platform.
    pub role: UserRole,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                role TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_user_role ON user(role);",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn create_user(name: &str, role: UserRole, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (name, role) VALUES (?1, ?2)",
        (name, role),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        name: name.to_owned(),
        role,
    })
}

/// Get the number of users in the database with the given `role`.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn count_users_with_role(
    role: UserRole,
    connection: &Connection,
) -> Result<usize, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM user WHERE role = ?1;",
            (role,),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Read-only access to the platform's users.
pub trait UserStore: Send + Sync {
    /// Count the users that have the given `role`.
    fn count_with_role(&self, role: UserRole) -> Result<usize, Error>;
}

/// Reads users from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    fn count_with_role(&self, role: UserRole) -> Result<usize, Error> {
        let connection = self
            .connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        count_users_with_role(role, &connection)
    }
}

#[cfg(test)]
mod user_tests {
    use rusqlite::Connection;

    use crate::user::{UserRole, count_users_with_role, create_user};

    use super::create_user_table;

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_user_table(&conn).expect("Could not create user table");

        conn
    }

    #[test]
    fn insert_user_succeeds() {
        let db_connection = get_db_connection();

        let inserted_user = create_user("Thandi", UserRole::Student, &db_connection).unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.name, "Thandi");
        assert_eq!(inserted_user.role, UserRole::Student);
    }

    #[test]
    fn counts_only_the_requested_role() {
        let db_connection = get_db_connection();
        create_user("Thandi", UserRole::Student, &db_connection).unwrap();
        create_user("Sipho", UserRole::Student, &db_connection).unwrap();
        create_user("Robyn", UserRole::Instructor, &db_connection).unwrap();
        create_user("Owner", UserRole::Admin, &db_connection).unwrap();

        let count = count_users_with_role(UserRole::Student, &db_connection)
            .expect("Could not get user count");

        assert_eq!(2, count, "Want two students, got {count}");
    }

    #[test]
    fn returns_zero_with_no_users() {
        let db_connection = get_db_connection();

        let count = count_users_with_role(UserRole::Student, &db_connection)
            .expect("Could not get user count");

        assert_eq!(0, count, "Want zero students before insertion, got {count}");
    }

    #[test]
    fn role_round_trips_through_text() {
        for role in [UserRole::Student, UserRole::Instructor, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }

        assert!("moderator".parse::<UserRole>().is_err());
    }
}
