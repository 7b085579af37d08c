use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use filingscope_core::companies::{
    exchange_company_id, Company, CompanyRepositoryTrait, ListedCompany, NewCompany,
};
use filingscope_core::errors::{DatabaseError, Error};
use filingscope_core::Result;
use log::debug;
use std::sync::Arc;

use super::model::{CompanyDB, NewCompanyDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{companies, company_peer_map};
use crate::utils::timestamp_to_text;

pub struct CompanyRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CompanyRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn update_one<F>(
        conn: &mut SqliteConnection,
        company_id: &str,
        affected: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<usize>,
    {
        match affected(conn).into_core()? {
            0 => Err(Error::Database(DatabaseError::NotFound(format!(
                "company {}",
                company_id
            )))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CompanyRepositoryTrait for CompanyRepository {
    fn get_company(&self, company_id: &str) -> Result<Option<Company>> {
        let mut conn = get_connection(&self.pool)?;
        let row = companies::table
            .find(company_id)
            .select(CompanyDB::as_select())
            .first::<CompanyDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(Company::try_from).transpose().into_core()
    }

    async fn insert_if_absent(&self, company: NewCompany) -> Result<bool> {
        let placeholder = company
            .ticker
            .as_deref()
            .map(exchange_company_id)
            .filter(|id| *id != company.id);
        let row = NewCompanyDB::from_domain(company, Utc::now());
        self.writer
            .exec(move |conn| {
                let inserted = diesel::insert_or_ignore_into(companies::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                if inserted == 0 {
                    return Ok(false);
                }
                if let Some(placeholder) = placeholder {
                    let retired = diesel::update(
                        companies::table
                            .filter(companies::id.eq(&placeholder))
                            .filter(companies::is_active.eq(true)),
                    )
                    .set((
                        companies::is_active.eq(false),
                        companies::updated_at.eq(&row.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;
                    if retired > 0 {
                        debug!("Deactivated {} in favour of {}", placeholder, row.id);
                    }
                }
                Ok(true)
            })
            .await
    }

    async fn insert_listings_if_absent(&self, listings: Vec<NewCompany>) -> Result<usize> {
        let now = Utc::now();
        let rows: Vec<NewCompanyDB> = listings
            .into_iter()
            .map(|c| NewCompanyDB::from_domain(c, now))
            .collect();
        self.writer
            .exec(move |conn| {
                let mut inserted = 0;
                for row in &rows {
                    if let Some(ticker) = row.ticker.as_deref() {
                        let held = diesel::select(diesel::dsl::exists(
                            companies::table.filter(companies::ticker.eq(ticker)),
                        ))
                        .get_result::<bool>(conn)
                        .into_core()?;
                        if held {
                            continue;
                        }
                    }
                    inserted += diesel::insert_or_ignore_into(companies::table)
                        .values(row)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn set_active(&self, company_id: String, is_active: bool) -> Result<()> {
        let now = timestamp_to_text(Utc::now());
        self.writer
            .exec(move |conn| {
                Self::update_one(conn, &company_id, |c| {
                    diesel::update(companies::table.find(&company_id))
                        .set((
                            companies::is_active.eq(is_active),
                            companies::updated_at.eq(&now),
                        ))
                        .execute(c)
                })
            })
            .await
    }

    async fn set_industry_code(
        &self,
        company_id: String,
        industry_code: Option<String>,
    ) -> Result<()> {
        let now = timestamp_to_text(Utc::now());
        self.writer
            .exec(move |conn| {
                Self::update_one(conn, &company_id, |c| {
                    diesel::update(companies::table.find(&company_id))
                        .set((
                            companies::industry_code.eq(&industry_code),
                            companies::updated_at.eq(&now),
                        ))
                        .execute(c)
                })
            })
            .await
    }

    fn list_active_listed(&self) -> Result<Vec<ListedCompany>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = companies::table
            .left_join(company_peer_map::table)
            .filter(companies::is_active.eq(true))
            .filter(companies::ticker.is_not_null())
            .order(companies::id.asc())
            .select((
                companies::id,
                companies::ticker,
                companies::industry_code,
                company_peer_map::peer_code.nullable(),
            ))
            .load::<(String, Option<String>, Option<String>, Option<String>)>(&mut conn)
            .into_core()?;

        Ok(rows
            .into_iter()
            .filter_map(|(company_id, ticker, industry_code, peer_code)| {
                let ticker = ticker.filter(|t| !t.trim().is_empty())?;
                Some(ListedCompany {
                    company_id,
                    ticker,
                    industry_code,
                    peer_code,
                })
            })
            .collect())
    }

    fn count_active(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        companies::table
            .filter(companies::is_active.eq(true))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }
}
