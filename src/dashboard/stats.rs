//! Aggregates recorded payments and users into dashboard totals.
//!
//! Totals are computed from the full transaction table on every call, which
//! keeps the numbers exact at the cost of a table scan per dashboard view.

use serde::Serialize;

use crate::{
    Error,
    payment::TransactionStore,
    user::{UserRole, UserStore},
};

/// Summary totals for the business dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// The sum of every payment received.
    pub total_revenue: f64,
    /// The sum of every owner payout.
    pub total_payout: f64,
    /// The sum of every growth fund contribution.
    pub total_growth_fund: f64,
    /// The number of users with the student role.
    pub total_students: usize,
}

/// Compute the dashboard totals from the stored transactions and users.
///
/// An empty transaction store produces zero totals.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidStoredValue] if any stored total is not a finite number,
/// - or the error from whichever store failed to answer.
pub fn get_dashboard_stats(
    transaction_store: &dyn TransactionStore,
    user_store: &dyn UserStore,
) -> Result<DashboardStats, Error> {
    let totals = transaction_store.totals()?;
    if !totals.is_finite() {
        return Err(Error::InvalidStoredValue(format!(
            "revenue {}, owner payout {}, growth fund {}",
            totals.revenue, totals.owner_payout, totals.growth_fund
        )));
    }

    let total_students = user_store.count_with_role(UserRole::Student)?;

    Ok(DashboardStats {
        total_revenue: totals.revenue,
        total_payout: totals.owner_payout,
        total_growth_fund: totals.growth_fund,
        total_students,
    })
}
