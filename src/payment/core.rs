//! Records course payments and splits them between the owner and the growth fund.

use crate::{
    Error,
    database_id::TransactionId,
    payment::{
        policy::{PaymentSplit, PayoutPolicy},
        store::{NewTransaction, TransactionStore},
    },
};

/// A payment as submitted by a client.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment<'a> {
    /// The gross amount paid, must be zero or more.
    pub amount: f64,
    /// The payment channel used.
    pub method: &'a str,
    /// The course that was paid for.
    pub course_id: &'a str,
}

/// Confirmation that a payment was durably recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentReceipt {
    /// The ID of the stored transaction.
    pub transaction_id: TransactionId,
    /// How the payment was split.
    pub split: PaymentSplit,
}

/// Split `payment` according to `policy` and append it to `store`.
///
/// Every call appends a new transaction, so submitting the same payment twice
/// records it twice.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is negative, NaN or infinite,
/// - [Error::TotalsOverflow] if the store cannot add the amount to its totals,
/// - or whatever error `store` returns if the transaction could not be stored.
pub fn record_payment(
    payment: Payment,
    policy: &PayoutPolicy,
    store: &dyn TransactionStore,
) -> Result<PaymentReceipt, Error> {
    if !payment.amount.is_finite() || payment.amount < 0.0 {
        return Err(Error::InvalidAmount(payment.amount));
    }

    let split = policy.split(payment.amount);

    let transaction = store.create(NewTransaction {
        amount: payment.amount,
        method: payment.method.to_owned(),
        course_id: payment.course_id.to_owned(),
        owner_payout: split.owner_payout,
        growth_fund: split.growth_fund,
    })?;

    tracing::info!(
        "recorded payment {} of {} via {} for course {} at {}",
        transaction.id,
        transaction.amount,
        transaction.method,
        transaction.course_id,
        transaction.recorded_at
    );

    Ok(PaymentReceipt {
        transaction_id: transaction.id,
        split: PaymentSplit {
            owner_payout: transaction.owner_payout,
            growth_fund: transaction.growth_fund,
        },
    })
}
