use crate::companies::companies_model::{Company, ListedCompany, NewCompany};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for company repository operations
#[async_trait]
pub trait CompanyRepositoryTrait: Send + Sync {
    fn get_company(&self, company_id: &str) -> Result<Option<Company>>;

    /// Inserts the company unless a row with the same id exists.
    /// Existing rows are never overwritten. Returns `true` when inserted.
    ///
    /// A newly inserted company with a ticker deactivates the exchange-listing
    /// placeholder (`KRX_{ticker}`) for that ticker in the same transaction.
    async fn insert_if_absent(&self, company: NewCompany) -> Result<bool>;

    /// Seeds exchange-listing companies, one write transaction. A listing is
    /// skipped when its id exists or when any company already holds its
    /// ticker. Returns the number of rows inserted.
    async fn insert_listings_if_absent(&self, companies: Vec<NewCompany>) -> Result<usize>;

    /// Companies are never deleted, only deactivated.
    async fn set_active(&self, company_id: String, is_active: bool) -> Result<()>;

    async fn set_industry_code(&self, company_id: String, industry_code: Option<String>)
        -> Result<()>;

    /// Active companies that have a ticker, with their peer mapping.
    fn list_active_listed(&self) -> Result<Vec<ListedCompany>>;

    fn count_active(&self) -> Result<i64>;
}
