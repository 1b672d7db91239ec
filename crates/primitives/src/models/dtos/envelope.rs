use serde::Deserialize;

/// Status value the admin API uses for a successful call. Anything else,
/// including a missing status, is a failure.
pub const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

#[derive(Debug, Deserialize)]
pub struct PaginatedEnvelope<T> {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: u64,
}

impl<T> PaginatedEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Body of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub struct ApiFailureBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiFailureBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}
