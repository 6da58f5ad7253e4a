//! Dashboard module
//!
//! Provides the business summary shown on the dashboard: total revenue, how
//! much of it has been paid out or kept in the growth fund, and how many
//! students are enrolled.

mod handlers;
mod stats;

pub use handlers::get_dashboard_stats_endpoint;
pub use stats::{DashboardStats, get_dashboard_stats};
