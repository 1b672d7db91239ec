use crate::session::AdminSession;
use hostadmin_primitives::error::ApiError;
use hostadmin_primitives::models::dtos::RefundQuery;
use hostadmin_primitives::models::entities::RefundPage;
use hostadmin_primitives::models::RefundListInfo;
use tracing::info;

/// The refund page currently on screen. Nothing else is cached; `refresh`
/// re-issues the last query.
pub struct RefundList {
    defaults: RefundListInfo,
    query: Option<RefundQuery>,
    page: RefundPage,
}

impl RefundList {
    pub fn new(defaults: RefundListInfo) -> Self {
        Self {
            defaults,
            query: None,
            page: RefundPage::default(),
        }
    }

    pub fn page(&self) -> &RefundPage {
        &self.page
    }

    pub fn query(&self) -> Option<&RefundQuery> {
        self.query.as_ref()
    }

    pub fn has_refund_for(&self, transaction_reference: &str) -> bool {
        self.page.has_refund_for(transaction_reference)
    }

    pub async fn load(
        &mut self,
        session: &AdminSession,
        page: u32,
        search: Option<&str>,
    ) -> Result<&RefundPage, ApiError> {
        let query = RefundQuery::new(self.defaults.per_page, self.defaults.sort_by.as_str())
            .page(page)
            .search(search);
        self.fetch(session, query).await
    }

    pub async fn refresh(&mut self, session: &AdminSession) -> Result<&RefundPage, ApiError> {
        let query = self.query.clone().unwrap_or_else(|| {
            RefundQuery::new(self.defaults.per_page, self.defaults.sort_by.as_str())
        });
        self.fetch(session, query).await
    }

    async fn fetch(
        &mut self,
        session: &AdminSession,
        query: RefundQuery,
    ) -> Result<&RefundPage, ApiError> {
        let page = session.refund_list(&query).await?;

        info!(
            page = page.page_number,
            total_pages = page.total_pages,
            total_items = page.total_items,
            search = ?query.search,
            "Loaded refunds"
        );

        self.query = Some(query);
        self.page = page;
        Ok(&self.page)
    }
}
