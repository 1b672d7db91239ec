use crate::session::AdminSession;
use hostadmin_primitives::error::ApiError;
use hostadmin_primitives::models::dtos::TransactionQuery;
use hostadmin_primitives::models::entities::{RefundPage, Transaction};
use tracing::info;

pub struct TransactionService;

impl TransactionService {
    pub async fn recent(
        session: &AdminSession,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, ApiError> {
        let transactions = session.transaction_list(query).await?;
        info!(count = transactions.len(), "Loaded transactions");
        Ok(transactions)
    }

    /// Successful transactions with no refund on the loaded refund page.
    pub fn refundable<'a>(
        transactions: &'a [Transaction],
        refunds: &RefundPage,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|t| t.is_successful())
            .filter(|t| !refunds.has_refund_for(&t.reference))
            .collect()
    }
}
