//! Payment recording for course purchases.
//!
//! This module contains everything related to payments:
//! - The [PayoutPolicy] that splits each payment between the owner and the growth fund
//! - The `Transaction` model and the store that persists it
//! - The endpoint that records a payment

mod core;
mod endpoint;
mod policy;
mod store;

pub use core::{Payment, PaymentReceipt, record_payment};
pub use endpoint::process_payment_endpoint;
pub use policy::{PaymentSplit, PayoutPolicy};
pub use store::{
    NewTransaction, SQLiteTransactionStore, Transaction, TransactionStore, TransactionTotals,
    create_transaction_table,
};
