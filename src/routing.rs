//! Application router configuration.

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::{
    AppState,
    content::{generate_course_endpoint, get_agents_endpoint},
    course::get_courses_endpoint,
    dashboard::get_dashboard_stats_endpoint,
    endpoints,
    payment::process_payment_endpoint,
};

/// Return a router with all the app's routes.
///
/// Requests that do not match an API route are served from `frontend_dir`,
/// falling back to its `index.html` so the browser dashboard can handle the path.
pub fn build_router(state: AppState, frontend_dir: &Path) -> Router {
    let frontend = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(frontend_dir.join("index.html")));

    Router::new()
        .route(endpoints::COURSES, get(get_courses_endpoint))
        .route(endpoints::GENERATE_COURSE, post(generate_course_endpoint))
        .route(endpoints::AGENTS, get(get_agents_endpoint))
        .route(endpoints::PROCESS_PAYMENT, post(process_payment_endpoint))
        .route(endpoints::DASHBOARD_STATS, get(get_dashboard_stats_endpoint))
        .fallback_service(frontend)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    use axum::http::{
        HeaderValue, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN},
    };
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, PayoutPolicy, endpoints,
        routing::build_router,
        user::{UserRole, create_user},
    };

    fn get_test_server(frontend_dir: &Path) -> (TestServer, AppState) {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection, PayoutPolicy::default()).unwrap();
        let app = build_router(state.clone(), frontend_dir);

        (
            TestServer::try_new(app).expect("Could not create test server."),
            state,
        )
    }

    fn temp_frontend_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("learnhub_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.html"), "<h1>LearnHub</h1>").unwrap();
        dir
    }

    #[tokio::test]
    async fn payments_show_up_in_dashboard_stats() {
        let (server, state) = get_test_server(Path::new("frontend"));
        create_user("Thandi", UserRole::Student, &state.db_connection.lock().unwrap()).unwrap();

        server
            .post(endpoints::PROCESS_PAYMENT)
            .json(&json!({ "amount": 100, "method": "payfast", "courseId": "c1" }))
            .await
            .assert_status_ok();
        server
            .post(endpoints::PROCESS_PAYMENT)
            .json(&json!({ "amount": 50, "method": "stripe", "courseId": "c2" }))
            .await
            .assert_status_ok();

        let stats = server
            .get(endpoints::DASHBOARD_STATS)
            .await
            .json::<serde_json::Value>();

        let total = |key: &str| stats[key].as_f64().unwrap();
        assert!((total("totalRevenue") - 150.0).abs() < 1e-9);
        assert!((total("totalPayout") - 90.0).abs() < 1e-9);
        assert!((total("totalGrowthFund") - 60.0).abs() < 1e-9);
        assert_eq!(stats["totalStudents"], 1);
    }

    #[tokio::test]
    async fn duplicate_payments_are_both_counted() {
        let (server, _) = get_test_server(Path::new("frontend"));
        let payment = json!({ "amount": 200, "method": "fnb", "courseId": "course-1" });

        server.post(endpoints::PROCESS_PAYMENT).json(&payment).await.assert_status_ok();
        server.post(endpoints::PROCESS_PAYMENT).json(&payment).await.assert_status_ok();

        let stats = server
            .get(endpoints::DASHBOARD_STATS)
            .await
            .json::<serde_json::Value>();
        assert_eq!(stats["totalRevenue"].as_f64(), Some(400.0));
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_index() {
        let frontend_dir = temp_frontend_dir("fallback");
        let (server, _) = get_test_server(&frontend_dir);

        let response = server.get("/some/dashboard/page").await;

        response.assert_status_ok();
        response.assert_text("<h1>LearnHub</h1>");
        fs::remove_dir_all(frontend_dir).ok();
    }

    #[tokio::test]
    async fn unknown_api_method_is_rejected() {
        let (server, _) = get_test_server(Path::new("frontend"));

        let response = server.get(endpoints::PROCESS_PAYMENT).await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn payment_that_overflows_totals_is_rejected() {
        let (server, _) = get_test_server(Path::new("frontend"));
        let payment = json!({ "amount": 1e308, "method": "fnb", "courseId": "course-1" });

        server.post(endpoints::PROCESS_PAYMENT).json(&payment).await.assert_status_ok();
        server
            .post(endpoints::PROCESS_PAYMENT)
            .json(&payment)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server.get(endpoints::DASHBOARD_STATS).await;
        response.assert_status_ok();
        let stats = response.json::<serde_json::Value>();
        assert_eq!(stats["totalRevenue"].as_f64(), Some(1e308));
        assert!(stats["totalPayout"].is_number());
        assert!(stats["totalGrowthFund"].is_number());
    }

    #[tokio::test]
    async fn api_allows_any_origin() {
        let (server, _) = get_test_server(Path::new("frontend"));

        let response = server
            .get(endpoints::AGENTS)
            .add_header(ORIGIN, HeaderValue::from_static("http://localhost:8080"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
    }
}
