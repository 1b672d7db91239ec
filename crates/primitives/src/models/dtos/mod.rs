pub mod auth_dto;
pub mod bank_dto;
pub mod envelope;
pub mod refund_dto;
pub mod transaction_dto;

pub use auth_dto::*;
pub use bank_dto::*;
pub use envelope::*;
pub use refund_dto::*;
pub use transaction_dto::*;
