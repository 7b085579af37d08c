//! Companies module - identity records seeded by filings and price rows.

mod companies_model;
mod companies_traits;

pub use companies_model::{exchange_company_id, Company, ListedCompany, NewCompany};
pub use companies_traits::CompanyRepositoryTrait;
