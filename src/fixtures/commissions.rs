// Commission ledger fixtures

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CommissionRecord {
    pub id: u32,
    pub date: &'static str,
    pub product: &'static str,
    pub customer: &'static str,
    pub sale_amount: f64,
    /// Display string, e.g. "15%"
    pub rate: &'static str,
    pub commission: f64,
    pub status: &'static str,
}

pub(super) fn commission_records() -> Vec<CommissionRecord> {
    vec![
        CommissionRecord {
            id: 1,
            date: "2024-01-25",
            product: "Premium Headphones",
            customer: "John D.",
            sale_amount: 299.99,
            rate: "15%",
            commission: 45.00,
            status: "approved",
        },
        CommissionRecord {
            id: 2,
            date: "2024-01-24",
            product: "Smart Watch",
            customer: "Sarah M.",
            sale_amount: 199.99,
            rate: "12%",
            commission: 24.00,
            status: "pending",
        },
        CommissionRecord {
            id: 3,
            date: "2024-01-23",
            product: "Fitness Tracker",
            customer: "Mike B.",
            sale_amount: 149.99,
            rate: "10%",
            commission: 15.00,
            status: "paid",
        },
    ]
}
