use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TransactionStatus {
    Success,
    Pending,
    Failed,
    Abandoned,
    Reversed,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RefundStatus {
    Pending,
    Processing,
    Success,
    Failed,
    Reversed,
    #[default]
    #[serde(other)]
    Unknown,
}
