use crate::models::app_state::api_details::ApiInfo;
use crate::models::app_state::refund_list_details::RefundListInfo;
use eyre::Report;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_details: ApiInfo,

    pub refund_list: RefundListInfo,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            api_details: ApiInfo::new()?,

            refund_list: RefundListInfo::new()?,
        })
    }
}
