use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Smallest refundable amount, in the currency's base unit (₦100).
pub const MINIMUM_REFUND_AMOUNT: i64 = 100;

static ACCOUNT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("account number pattern is valid"));

/// Returns true when `value` is a complete NUBAN account number.
pub fn is_complete_account_number(value: &str) -> bool {
    ACCOUNT_NUMBER.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefundQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub sort_by: String,
}

impl RefundQuery {
    pub fn new(per_page: u32, sort_by: impl Into<String>) -> Self {
        Self {
            page: 1,
            per_page,
            search: None,
            sort_by: sort_by.into(),
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Blank search text is treated as no filter.
    pub fn search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct InitiateRefundRequest<'a> {
    pub reference: &'a str,
    pub amount: i64,
    pub account_number: &'a str,
    pub account_name: &'a str,
    pub bank_code: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct InitiateRefundData {
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Serialize)]
pub struct TransferRequest<'a> {
    pub reference: &'a str,
    pub password: &'a str,
}

/// Phase one input: what the admin has typed so far.
///
/// `destination_account_name` is only ever set from a successful account
/// verification and is wiped whenever the bank or account number changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct RefundDraft {
    #[validate(length(min = 1, message = "Select the transaction to refund"))]
    pub source_transaction_reference: String,

    #[validate(range(min = 100, message = "Refund amount must be at least ₦100"))]
    pub amount: i64,

    #[validate(regex(path = *ACCOUNT_NUMBER, message = "Enter a valid 10-digit account number"))]
    destination_account_number: String,

    #[validate(length(min = 1, message = "Select the destination bank"))]
    destination_bank_code: String,

    #[validate(length(min = 1, message = "Verify the destination account before submitting"))]
    destination_account_name: String,
}

impl RefundDraft {
    pub fn for_transaction(reference: impl Into<String>) -> Self {
        Self {
            source_transaction_reference: reference.into(),
            ..Self::default()
        }
    }

    pub fn destination_account_number(&self) -> &str {
        &self.destination_account_number
    }

    pub fn destination_bank_code(&self) -> &str {
        &self.destination_bank_code
    }

    pub fn destination_account_name(&self) -> &str {
        &self.destination_account_name
    }

    /// Returns true if the value changed.
    pub fn set_account_number(&mut self, account_number: &str) -> bool {
        let account_number = account_number.trim();
        if self.destination_account_number == account_number {
            return false;
        }
        self.destination_account_number = account_number.to_owned();
        self.destination_account_name.clear();
        true
    }

    /// Returns true if the value changed.
    pub fn set_bank_code(&mut self, bank_code: &str) -> bool {
        let bank_code = bank_code.trim();
        if self.destination_bank_code == bank_code {
            return false;
        }
        self.destination_bank_code = bank_code.to_owned();
        self.destination_account_name.clear();
        true
    }

    pub fn record_verified_name(&mut self, account_name: impl Into<String>) {
        self.destination_account_name = account_name.into();
    }

    pub fn clear_verified_name(&mut self) {
        self.destination_account_name.clear();
    }

    /// The `(account_number, bank_code)` pair to verify, once both are
    /// complete.
    pub fn verification_target(&self) -> Option<(&str, &str)> {
        if self.destination_bank_code.is_empty()
            || !is_complete_account_number(&self.destination_account_number)
        {
            return None;
        }
        Some((&self.destination_account_number, &self.destination_bank_code))
    }

    pub fn to_request(&self) -> InitiateRefundRequest<'_> {
        InitiateRefundRequest {
            reference: &self.source_transaction_reference,
            amount: self.amount,
            account_number: &self.destination_account_number,
            account_name: &self.destination_account_name,
            bank_code: &self.destination_bank_code,
        }
    }
}

/// What a successful initiation hands over to the transfer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundHandle {
    pub reference: String,
    pub amount: i64,
    pub destination_account_name: String,
    pub destination_account_number: String,
}

impl RefundHandle {
    pub fn from_draft(reference: String, draft: RefundDraft) -> Self {
        Self {
            reference,
            amount: draft.amount,
            destination_account_name: draft.destination_account_name,
            destination_account_number: draft.destination_account_number,
        }
    }
}

/// Phase two input. The password never outlives one submission attempt.
#[derive(Debug)]
pub struct TransferDraft {
    pub refund_reference: String,
    admin_password: Option<SecretString>,
}

impl TransferDraft {
    pub fn new(refund_reference: impl Into<String>) -> Self {
        Self {
            refund_reference: refund_reference.into(),
            admin_password: None,
        }
    }

    pub fn set_password(&mut self, password: SecretString) {
        self.admin_password = Some(password);
    }

    pub fn take_password(&mut self) -> Option<SecretString> {
        self.admin_password.take()
    }
}
