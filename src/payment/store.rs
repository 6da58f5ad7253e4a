//! Defines the payment transaction model, its table and the store that persists it.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// A recorded course payment and how it was split.
///
/// Transactions are append-only: once recorded they are never updated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The gross amount paid.
    pub amount: f64,
    /// The payment channel used, e.g. "payfast" or "stripe".
    pub method: String,
    /// The course that was paid for, as given by the client.
    pub course_id: String,
    /// The part of the payment paid out to the owner.
    pub owner_payout: f64,
    /// The part of the payment kept in the growth fund.
    pub growth_fund: f64,
    /// When the transaction was recorded.
    pub recorded_at: OffsetDateTime,
}

/// The data needed to record a new [Transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The gross amount paid.
    pub amount: f64,
    /// The payment channel used.
    pub method: String,
    /// The course that was paid for.
    pub course_id: String,
    /// The part of the payment paid out to the owner.
    pub owner_payout: f64,
    /// The part of the payment kept in the growth fund.
    pub growth_fund: f64,
}

/// Sums over every recorded transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransactionTotals {
    /// The sum of all payment amounts.
    pub revenue: f64,
    /// The sum of all owner payouts.
    pub owner_payout: f64,
    /// The sum of all growth fund contributions.
    pub growth_fund: f64,
}

impl TransactionTotals {
    /// Whether every total is a finite number.
    pub fn is_finite(&self) -> bool {
        self.revenue.is_finite() && self.owner_payout.is_finite() && self.growth_fund.is_finite()
    }
}

// ============================================================================
// STORE
// ============================================================================

/// Handles the recording and summing of payment transactions.
pub trait TransactionStore: Send + Sync {
    /// Append a new transaction to the store.
    ///
    /// Implementers must only return `Ok` once the transaction is durably stored,
    /// and must reject a transaction that would make the totals non-finite.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Sum the amounts, owner payouts and growth fund contributions of every
    /// transaction. An empty store sums to zero.
    fn totals(&self) -> Result<TransactionTotals, Error>;

    /// Count the transactions in the store.
    fn count(&self) -> Result<usize, Error>;
}

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Insert the transaction inside a SQL transaction and commit it before
    /// returning the stored row.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - [Error::TotalsOverflow] if the new totals would not be finite,
    /// - or [Error::SqlError] if the insert or commit failed, in which case nothing is stored.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.lock()?;
        let sql_transaction = connection.unchecked_transaction()?;

        let created = sql_transaction
            .prepare(
                "INSERT INTO \"transaction\" (amount, method, course_id, owner_payout, growth_fund, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING id, amount, method, course_id, owner_payout, growth_fund, recorded_at",
            )?
            .query_row(
                (
                    transaction.amount,
                    &transaction.method,
                    &transaction.course_id,
                    transaction.owner_payout,
                    transaction.growth_fund,
                    OffsetDateTime::now_utc(),
                ),
                map_transaction_row,
            )?;

        if !get_transaction_totals(&sql_transaction)?.is_finite() {
            return Err(Error::TotalsOverflow(transaction.amount));
        }

        sql_transaction.commit()?;

        Ok(created)
    }

    fn totals(&self) -> Result<TransactionTotals, Error> {
        let connection = self.lock()?;

        get_transaction_totals(&connection)
    }

    fn count(&self) -> Result<usize, Error> {
        let connection = self.lock()?;

        count_transactions(&connection)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Sum every transaction in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_transaction_totals(connection: &Connection) -> Result<TransactionTotals, Error> {
    connection
        .query_row(
            "SELECT
                COALESCE(SUM(amount), 0.0),
                COALESCE(SUM(owner_payout), 0.0),
                COALESCE(SUM(growth_fund), 0.0)
            FROM \"transaction\";",
            [],
            |row| {
                Ok(TransactionTotals {
                    revenue: row.get(0)?,
                    owner_payout: row.get(1)?,
                    growth_fund: row.get(2)?,
                })
            },
        )
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount >= 0),
                method TEXT NOT NULL,
                course_id TEXT NOT NULL,
                owner_payout REAL NOT NULL,
                growth_fund REAL NOT NULL,
                recorded_at TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        method: row.get(2)?,
        course_id: row.get(3)?,
        owner_payout: row.get(4)?,
        growth_fund: row.get(5)?,
        recorded_at: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
