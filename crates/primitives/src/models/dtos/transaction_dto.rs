use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionQuery {
    pub per_page: u32,
    pub sort_by: String,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            per_page: 50,
            sort_by: "created_at".into(),
        }
    }
}
