//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    content::AgentRegistry,
    db::initialize,
    payment::{PayoutPolicy, SQLiteTransactionStore, TransactionStore},
    user::{SQLiteUserStore, UserStore},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The store that course payments are recorded in.
    pub transaction_store: Arc<dyn TransactionStore>,

    /// The store the dashboard counts users from.
    pub user_store: Arc<dyn UserStore>,

    /// How each payment is split between the owner and the growth fund.
    pub payout_policy: PayoutPolicy,

    /// The content agents known to the platform.
    pub agents: Arc<AgentRegistry>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, payout_policy: PayoutPolicy) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            transaction_store: Arc::new(SQLiteTransactionStore::new(connection.clone())),
            user_store: Arc::new(SQLiteUserStore::new(connection.clone())),
            db_connection: connection,
            payout_policy,
            agents: Arc::new(AgentRegistry::default()),
        })
    }
}
