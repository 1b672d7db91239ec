use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct VerifyAccountRequest<'a> {
    pub account_number: &'a str,
    pub bank_code: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct VerifiedAccountData {
    #[serde(default)]
    pub account_name: Option<String>,
}
