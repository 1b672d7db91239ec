use crate::models::entities::enum_types::{RefundStatus, TransactionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The source transaction a refund was raised against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundTransaction {
    pub reference: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    pub reference: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub status: RefundStatus,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub bank_code: Option<String>,
    #[serde(default)]
    pub transaction: Option<RefundTransaction>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Refund {
    pub fn source_reference(&self) -> Option<&str> {
        self.transaction.as_ref().map(|t| t.reference.as_str())
    }
}

/// One page of the refund list, as currently loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefundPage {
    pub items: Vec<Refund>,
    pub page_number: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl RefundPage {
    /// Whether any loaded refund was raised against `transaction_reference`.
    pub fn has_refund_for(&self, transaction_reference: &str) -> bool {
        self.items
            .iter()
            .any(|r| r.source_reference() == Some(transaction_reference))
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}
