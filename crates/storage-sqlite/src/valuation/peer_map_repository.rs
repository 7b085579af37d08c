use async_trait::async_trait;
use diesel::prelude::*;
use filingscope_core::valuation::{PeerMapRepositoryTrait, PeerMapping};
use filingscope_core::Result;
use std::sync::Arc;

use super::model::PeerMappingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::company_peer_map;

pub struct PeerMapRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PeerMapRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PeerMapRepositoryTrait for PeerMapRepository {
    fn get_mapping(&self, company_id: &str) -> Result<Option<PeerMapping>> {
        let mut conn = get_connection(&self.pool)?;
        company_peer_map::table
            .find(company_id)
            .select(PeerMappingDB::as_select())
            .first::<PeerMappingDB>(&mut conn)
            .optional()
            .into_core()?
            .map(PeerMapping::try_from)
            .transpose()
            .into_core()
    }

    async fn insert_auto_mappings(&self, mappings: Vec<PeerMapping>) -> Result<usize> {
        if mappings.is_empty() {
            return Ok(0);
        }
        let rows: Vec<PeerMappingDB> = mappings.into_iter().map(PeerMappingDB::from).collect();
        self.writer
            .exec(move |conn| {
                let mut inserted = 0;
                for row in &rows {
                    inserted += diesel::insert_or_ignore_into(company_peer_map::table)
                        .values(row)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn upsert_manual_mapping(&self, mapping: PeerMapping) -> Result<()> {
        let row = PeerMappingDB::from(PeerMapping {
            is_manual: true,
            ..mapping
        });
        self.writer
            .exec(move |conn| {
                diesel::replace_into(company_peer_map::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }
}
