//! LearnHub is the backend for a small e-learning platform.
//!
//! This library provides a JSON REST API for listing courses, generating
//! template course content, recording course payments with a fixed revenue
//! split, and summarising those payments on the business dashboard. It also
//! serves the browser dashboard as static files.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod content;
mod course;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod payment;
mod routing;
#[cfg(test)]
mod test_utils;
mod user;

pub use app_state::AppState;
pub use content::{
    Agent, AgentRegistry, AgentStatus, Assessments, Assignment, CourseContent, CourseModule, Quiz,
    generate_course_content,
};
pub use course::{Course, CourseStatus, NewCourse, create_course, list_active_courses};
pub use dashboard::{DashboardStats, get_dashboard_stats};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use payment::{
    NewTransaction, Payment, PaymentReceipt, PaymentSplit, PayoutPolicy, SQLiteTransactionStore,
    Transaction, TransactionStore, TransactionTotals, record_payment,
};
pub use routing::build_router;
pub use user::{SQLiteUserStore, User, UserID, UserRole, UserStore, create_user};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A payment amount was negative, NaN or infinite.
    #[error("{0} is not a valid payment amount, amounts must be a finite number of zero or more")]
    InvalidAmount(f64),

    /// Recording a payment of this amount would push the payment totals beyond
    /// what can be represented.
    #[error("a payment of {0} would make the payment totals too large to record")]
    TotalsOverflow(f64),

    /// The owner and growth fund shares do not describe a valid split.
    ///
    /// Each share must lie in `[0, 1]` and the two shares must add up to one.
    #[error("invalid payout policy: owner share {owner_share}, growth share {growth_share}")]
    InvalidPayoutPolicy {
        /// The share of each payment paid out to the platform owner.
        owner_share: f64,
        /// The share of each payment kept in the growth fund.
        growth_share: f64,
    },

    /// The request body could not be parsed.
    ///
    /// The string holds the parser's description of the problem and is safe
    /// to show to the client.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An empty string was used as the topic for generating a course.
    #[error("course topic cannot be empty")]
    EmptyTopic,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A stored value could not be interpreted, e.g. an unknown user role.
    #[error("could not parse stored value \"{0}\"")]
    InvalidStoredValue(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_owned(),
        }),
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_json_response("Internal server error")
    }
}

impl Error {
    /// Whether the error was caused by the client's input rather than the server.
    fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidAmount(_)
                | Error::TotalsOverflow(_)
                | Error::InvalidRequest(_)
                | Error::EmptyTopic
        )
    }

    /// Convert the error into a JSON response of the form `{ "error": "..." }`.
    ///
    /// Client errors are reported with status 400 and their own message. Any
    /// other error is logged and replaced with `context`, e.g. "Payment
    /// processing failed", with status 500 so that internal details never reach
    /// the client.
    pub(crate) fn into_json_response(self, context: &str) -> Response {
        if self.is_client_error() {
            return json_error(StatusCode::BAD_REQUEST, &self.to_string());
        }

        match self {
            Error::NotFound => json_error(StatusCode::NOT_FOUND, context),
            error => {
                tracing::error!("{context}: {error}");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, context)
            }
        }
    }
}
