use serde::{Deserialize, Serialize};

/// Combined dashboard summary, assembled from three independent queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardData {
    pub number_of_invoices: u64,
    pub number_of_customers: u64,
    /// Total paid invoice amount in minor currency units
    pub total_paid_invoices: i64,
    /// Total pending invoice amount in minor currency units
    pub total_pending_invoices: i64,
}
