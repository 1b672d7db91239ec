use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    #[serde(rename = "bankCode")]
    pub code: String,
    #[serde(rename = "bankName")]
    pub name: String,
    #[serde(rename = "bankId", default)]
    pub id: Option<i64>,
}
