// KPI, dashboard and analytics fixtures

use serde::Serialize;

/// Flat KPI block served by the demo server
#[derive(Debug, Clone, Serialize)]
pub struct KpiSummary {
    pub total_links: u32,
    pub total_clicks: u32,
    pub conversions: u32,
    pub conversion_rate: f64,
    pub total_commission: f64,
    pub pending_commission: f64,
    pub paid_commission: f64,
    pub active_links: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_earnings: f64,
    pub total_clicks: u32,
    pub total_conversions: u32,
    pub conversion_rate: f64,
    pub pending_commissions: f64,
    pub approved_commissions: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub product: &'static str,
    pub date: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub revenue_trend: Vec<RevenuePoint>,
    pub top_products: Vec<ProductSales>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenuePoint {
    pub date: &'static str,
    pub revenue: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSales {
    pub name: &'static str,
    pub sales: u32,
    pub revenue: u32,
}

pub(super) const fn kpi_summary() -> KpiSummary {
    KpiSummary {
        total_links: 24,
        total_clicks: 15847,
        conversions: 387,
        conversion_rate: 2.44,
        total_commission: 2847.92,
        pending_commission: 892.45,
        paid_commission: 1955.47,
        active_links: 24,
    }
}

pub(super) fn dashboard_summary() -> DashboardSummary {
    DashboardSummary {
        stats: DashboardStats {
            total_earnings: 15420.50,
            total_clicks: 25847,
            total_conversions: 342,
            conversion_rate: 1.32,
            pending_commissions: 1247.30,
            approved_commissions: 14173.20,
        },
        recent_activity: vec![
            ActivityEntry {
                kind: "commission",
                amount: Some(45.67),
                product: "Premium Headphones",
                date: "2024-01-31T12:00:00Z",
            },
            ActivityEntry {
                kind: "click",
                amount: None,
                product: "Smart Watch",
                date: "2024-01-31T11:58:00Z",
            },
        ],
    }
}

pub(super) fn analytics_summary() -> AnalyticsSummary {
    let trend = [
        ("2024-01-27", 1200),
        ("2024-01-28", 1350),
        ("2024-01-29", 1100),
        ("2024-01-30", 1600),
        ("2024-01-31", 1450),
    ];
    let products = [
        ("Premium Headphones", 45, 2250),
        ("Smart Watch", 32, 1920),
        ("Fitness Tracker", 28, 1400),
    ];

    AnalyticsSummary {
        revenue_trend: trend
            .into_iter()
            .map(|(date, revenue)| RevenuePoint { date, revenue })
            .collect(),
        top_products: products
            .into_iter()
            .map(|(name, sales, revenue)| ProductSales {
                name,
                sales,
                revenue,
            })
            .collect(),
    }
}
