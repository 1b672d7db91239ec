use crate::session::AdminSession;
use hostadmin_primitives::error::ApiError;
use hostadmin_primitives::models::entities::Bank;
use tracing::{info, warn};

pub struct BankService;

impl BankService {
    /// Banks a refund can be paid into, sorted by name.
    pub async fn list_banks(session: &AdminSession) -> Result<Vec<Bank>, ApiError> {
        let mut banks = session.bank_list().await?;

        if banks.is_empty() {
            warn!("Admin API returned an empty bank list");
        }

        banks.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        info!(count = banks.len(), "Loaded banks");
        Ok(banks)
    }

    pub fn bank_name<'a>(banks: &'a [Bank], bank_code: &str) -> Option<&'a str> {
        banks
            .iter()
            .find(|b| b.code == bank_code)
            .map(|b| b.name.as_str())
    }
}
