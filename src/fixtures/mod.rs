//! Fixture tables
//!
//! Every record the servers hand out is a literal defined here. The tables are
//! built once when `AppState` is created and never mutated afterwards.

mod commissions;
mod links;
mod metrics;

use commissions::CommissionRecord;
use links::LinkRecord;
use metrics::{AnalyticsSummary, DashboardSummary, KpiSummary};

pub use links::NewLink;

/// Timestamp stamped on every generated payload
pub const FIXED_TIMESTAMP: &str = "2024-01-31T12:00:00Z";

/// All fixture data served by the demo and web servers
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub links: Vec<LinkRecord>,
    pub commissions: Vec<CommissionRecord>,
    pub kpis: KpiSummary,
    pub dashboard: DashboardSummary,
    pub analytics: AnalyticsSummary,
}

impl Fixtures {
    pub fn load() -> Self {
        Self {
            links: links::link_records(),
            commissions: commissions::commission_records(),
            kpis: metrics::kpi_summary(),
            dashboard: metrics::dashboard_summary(),
            analytics: metrics::analytics_summary(),
        }
    }
}
