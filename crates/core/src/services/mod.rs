pub mod bank_service;
pub mod refund_error;
pub mod refund_list;
pub mod refund_workflow;
pub mod transaction_service;
pub mod verification;
