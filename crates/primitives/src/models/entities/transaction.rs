use crate::models::entities::enum_types::TransactionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer payment as reported by the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub reference: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn is_successful(&self) -> bool {
        self.status == TransactionStatus::Success
    }
}
