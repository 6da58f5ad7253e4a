//! Dashboard HTTP handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, dashboard::stats::get_dashboard_stats, payment::TransactionStore, user::UserStore,
};

/// The state needed for computing the dashboard totals.
#[derive(Clone)]
pub struct DashboardState {
    /// The store holding recorded payments.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// The store holding the platform's users.
    pub user_store: Arc<dyn UserStore>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            user_store: state.user_store.clone(),
        }
    }
}

/// Respond with the current dashboard totals as JSON.
pub async fn get_dashboard_stats_endpoint(State(state): State<DashboardState>) -> Response {
    match get_dashboard_stats(
        state.transaction_store.as_ref(),
        state.user_store.as_ref(),
    ) {
        Ok(stats) => Json(stats).into_response(),
        Err(error) => error.into_json_response("Failed to fetch dashboard stats"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use serde_json::json;

    use crate::{
        Error,
        dashboard::handlers::{DashboardState, get_dashboard_stats_endpoint},
        payment::{SQLiteTransactionStore, TransactionStore, TransactionTotals},
        test_utils::{assert_content_type, assert_status_ok, get_json_body, get_test_connection},
        user::{SQLiteUserStore, UserRole, create_user},
    };

    struct UnavailableTransactionStore;

    impl TransactionStore for UnavailableTransactionStore {
        fn create(
            &self,
            _: crate::payment::NewTransaction,
        ) -> Result<crate::payment::Transaction, Error> {
            Err(Error::DatabaseLockError)
        }

        fn totals(&self) -> Result<TransactionTotals, Error> {
            Err(Error::DatabaseLockError)
        }

        fn count(&self) -> Result<usize, Error> {
            Err(Error::DatabaseLockError)
        }
    }

    #[tokio::test]
    async fn returns_zeroes_not_nulls_for_empty_store() {
        let connection = Arc::new(Mutex::new(get_test_connection()));
        create_user("Thandi", UserRole::Student, &connection.lock().unwrap()).unwrap();
        let state = DashboardState {
            transaction_store: Arc::new(SQLiteTransactionStore::new(connection.clone())),
            user_store: Arc::new(SQLiteUserStore::new(connection)),
        };

        let response = get_dashboard_stats_endpoint(State(state)).await;

        assert_status_ok(&response);
        assert_content_type(&response, "application/json");
        assert_eq!(
            get_json_body(response).await,
            json!({
                "totalRevenue": 0.0,
                "totalPayout": 0.0,
                "totalGrowthFund": 0.0,
                "totalStudents": 1
            })
        );
    }

    #[tokio::test]
    async fn read_failure_returns_server_error() {
        let connection = Arc::new(Mutex::new(get_test_connection()));
        let state = DashboardState {
            transaction_store: Arc::new(UnavailableTransactionStore),
            user_store: Arc::new(SQLiteUserStore::new(connection)),
        };

        let response = get_dashboard_stats_endpoint(State(state)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            get_json_body(response).await,
            json!({ "error": "Failed to fetch dashboard stats" })
        );
    }
}
