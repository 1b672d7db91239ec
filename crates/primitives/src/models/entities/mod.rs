pub mod bank;
pub mod enum_types;
pub mod refund;
pub mod transaction;

pub use bank::*;
pub use enum_types::*;
pub use refund::*;
pub use transaction::*;
