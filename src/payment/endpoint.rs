//! Defines the endpoint for recording a course payment.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    database_id::TransactionId,
    payment::{
        core::{Payment, record_payment},
        policy::PayoutPolicy,
        store::TransactionStore,
    },
};

/// The message sent to the client when a payment could not be recorded.
const PAYMENT_FAILED: &str = "Payment processing failed";

/// The state needed to record a payment.
#[derive(Clone)]
pub struct PaymentState {
    /// The store that payments are appended to.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// How each payment is split between the owner and the growth fund.
    pub payout_policy: PayoutPolicy,
}

impl FromRef<AppState> for PaymentState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            payout_policy: state.payout_policy,
        }
    }
}

/// The JSON body for recording a payment.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// The gross amount paid.
    pub amount: f64,
    /// The payment channel used, e.g. "payfast".
    pub method: String,
    /// The course that was paid for.
    pub course_id: String,
}

/// The JSON body sent back once a payment has been recorded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentResponse {
    success: bool,
    transaction_id: TransactionId,
    owner_payout: f64,
    growth_fund: f64,
    message: &'static str,
}

/// A route handler for recording a payment.
///
/// Responds with the payment's split once the transaction has been stored, or
/// with `{ "error": "..." }` if the payment was invalid or could not be stored.
pub async fn process_payment_endpoint(
    State(state): State<PaymentState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("rejected payment request: {rejection}");
            return Error::InvalidRequest(rejection.body_text()).into_json_response(PAYMENT_FAILED);
        }
    };

    let payment = Payment {
        amount: request.amount,
        method: &request.method,
        course_id: &request.course_id,
    };

    match record_payment(
        payment,
        &state.payout_policy,
        state.transaction_store.as_ref(),
    ) {
        Ok(receipt) => Json(PaymentResponse {
            success: true,
            transaction_id: receipt.transaction_id,
            owner_payout: receipt.split.owner_payout,
            growth_fund: receipt.split.growth_fund,
            message: "Payment processed successfully",
        })
        .into_response(),
        Err(error) => error.into_json_response(PAYMENT_FAILED),
    }
}
