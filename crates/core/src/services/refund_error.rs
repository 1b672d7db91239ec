use hostadmin_primitives::error::ApiError;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

/// Everything that can stop the refund workflow, already phrased for the
/// admin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefundError {
    /// A local precondition failed; nothing was sent.
    #[error("{0}")]
    Invalid(String),

    #[error("A refund has already been initiated for transaction {reference}")]
    DuplicateRefund { reference: String },

    #[error("Enter your admin password to confirm the transfer")]
    EmptyPassword,

    #[error("No refund is being drafted")]
    NoActiveDraft,

    #[error("No initiated refund is awaiting transfer")]
    NoActiveHandle,

    #[error("Account verification failed: {reason}")]
    VerificationFailed { reason: String },

    #[error("Refund was initiated but no reference was returned")]
    MissingReference,

    /// The API no longer accepts the admin's session token.
    #[error("Your admin session has expired. Sign in again to continue.")]
    SessionExpired,

    /// The API refused the request. `message` is the admin-facing text,
    /// `raw` what the API actually said.
    #[error("{message}")]
    Rejected { message: String, raw: String },

    #[error("An unexpected error occurred.")]
    Unexpected,
}

const DRAFT_FIELDS: [&str; 5] = [
    "source_transaction_reference",
    "amount",
    "destination_account_number",
    "destination_bank_code",
    "destination_account_name",
];

type FailureTable = &'static [(&'static [&'static str], &'static str)];

const INITIATE_FAILURES: FailureTable = &[
    (
        &["invalid transaction reference"],
        "The selected transaction reference is invalid. Pick the transaction again.",
    ),
    (
        &["invalid bank code"],
        "The selected bank is not supported for refunds. Choose another bank.",
    ),
    (
        &["unsuccessful", "not successful", "expired"],
        "Refunds can only be made on successful transactions that have not expired.",
    ),
    (
        &["exceed", "greater than the original", "more than the original"],
        "The refund amount cannot be more than the original transaction amount.",
    ),
    (
        &["minimum", "at least"],
        "The refund amount must be at least ₦100.",
    ),
    (
        &["already exist", "duplicate", "already been refunded", "already initiated"],
        "A refund has already been initiated for this transaction.",
    ),
];

const INCORRECT_PASSWORD: (&[&str], &str) = (
    &["incorrect password", "invalid password"],
    "Incorrect password. Please check your admin password and try again.",
);

const PASSWORD_FAILURES: FailureTable = &[INCORRECT_PASSWORD];

const TRANSFER_FAILURES: FailureTable = &[
    (
        &["invalid transfer reference", "invalid reference"],
        "This refund reference is invalid or has expired. Initiate the refund again.",
    ),
    INCORRECT_PASSWORD,
    (
        &["third party payout", "third-party payout", "payouts are disabled", "payouts disabled"],
        "Third-party payouts are disabled on this account. Contact support to enable them.",
    ),
    (
        &["duplicate", "already been processed", "already processed"],
        "This transfer has already been processed.",
    ),
];

fn friendly(table: FailureTable, raw: &str) -> Option<&'static str> {
    let lowered = raw.to_lowercase();
    table
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
        .map(|(_, message)| *message)
}

impl RefundError {
    /// First failing draft field, in form order.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let message = DRAFT_FIELDS
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "The refund details are incomplete".to_string());

        RefundError::Invalid(message)
    }

    pub fn initiation_failure(err: ApiError) -> Self {
        Self::from_api(err, INITIATE_FAILURES)
    }

    /// A 401 on transfer is the password check failing unless the API says
    /// otherwise; any other 401 means the session is gone.
    pub fn transfer_failure(err: ApiError) -> Self {
        if let ApiError::Auth(raw) = &err {
            if let Some(message) = friendly(PASSWORD_FAILURES, raw) {
                return RefundError::Rejected {
                    message: message.to_owned(),
                    raw: raw.clone(),
                };
            }
        }
        Self::from_api(err, TRANSFER_FAILURES)
    }

    pub fn verification_failure(err: &ApiError) -> Self {
        let reason = match err {
            ApiError::Auth(_) => "your admin session has expired".to_string(),
            _ => err
                .remote_message()
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
                .unwrap_or_else(|| "the account could not be verified right now".to_string()),
        };
        RefundError::VerificationFailed { reason }
    }

    fn from_api(err: ApiError, table: FailureTable) -> Self {
        match &err {
            ApiError::Rejected { message: raw, .. } => {
                let message = friendly(table, raw).map_or_else(|| raw.clone(), str::to_owned);
                RefundError::Rejected {
                    message,
                    raw: raw.clone(),
                }
            }
            ApiError::Auth(raw) => {
                warn!(message = %raw, "Admin session rejected");
                RefundError::SessionExpired
            }
            _ => {
                error!(error = %err, "Unexpected admin API failure");
                RefundError::Unexpected
            }
        }
    }

    /// True when the error was raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            RefundError::Invalid(_)
                | RefundError::DuplicateRefund { .. }
                | RefundError::EmptyPassword
                | RefundError::NoActiveDraft
                | RefundError::NoActiveHandle
        )
    }
}
