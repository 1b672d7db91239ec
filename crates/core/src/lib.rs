pub mod clients;
pub mod services;
pub mod session;

pub use clients::AdminClient;
pub use services::refund_error::RefundError;
pub use services::refund_workflow::{RefundStep, RefundWorkflow};
pub use session::AdminSession;
