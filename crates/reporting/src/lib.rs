//! Read-side reporting over the catalog and derived balances.

pub mod dashboard;

pub use dashboard::{dashboard_summary, DashboardSummary};
