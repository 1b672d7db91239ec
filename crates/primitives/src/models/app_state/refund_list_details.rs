use eyre::{eyre, Report};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundListInfo {
    pub per_page: u32,
    pub sort_by: String,
}

impl Default for RefundListInfo {
    fn default() -> Self {
        Self {
            per_page: 10,
            sort_by: "created_at".into(),
        }
    }
}

impl RefundListInfo {
    pub fn new() -> Result<Self, Report> {
        let per_page: u32 = env::var("HOSTADMIN_REFUNDS_PER_PAGE")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .map_err(|e| eyre!("HOSTADMIN_REFUNDS_PER_PAGE is not a number: {}", e))?;

        if per_page == 0 {
            return Err(eyre!("HOSTADMIN_REFUNDS_PER_PAGE must be at least 1"));
        }

        Ok(Self {
            per_page,
            sort_by: env::var("HOSTADMIN_REFUNDS_SORT_BY").unwrap_or_else(|_| "created_at".into()),
        })
    }
}
