pub mod api_details;
pub mod app_config;
pub mod refund_list_details;

pub use api_details::*;
pub use app_config::*;
pub use refund_list_details::*;
