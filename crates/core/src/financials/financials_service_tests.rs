#[cfg(test)]
mod tests {
    use crate::errors::Result;
    use crate::filings::{Filing, FilingCategory, KeyNumbers, PerformanceFigures};
    use crate::financials::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    #[derive(Default)]
    struct InMemoryFinancialRepository {
        quarters: RwLock<HashMap<String, QuarterlyFinancial>>,
        ttm: RwLock<HashMap<String, TtmFinancial>>,
        ttm_writes: RwLock<usize>,
    }

    #[async_trait]
    impl FinancialRepositoryTrait for InMemoryFinancialRepository {
        fn get_quarter(&self, key: &QuarterKey) -> Result<Option<QuarterlyFinancial>> {
            Ok(self.quarters.read().unwrap().get(&key.id()).cloned())
        }

        fn get_recent_quarters(
            &self,
            company_id: &str,
            limit: i64,
        ) -> Result<Vec<QuarterlyFinancial>> {
            let mut rows: Vec<_> = self
                .quarters
                .read()
                .unwrap()
                .values()
                .filter(|q| q.company_id == company_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| (b.year, b.quarter).cmp(&(a.year, a.quarter)));
            rows.truncate(limit as usize);
            Ok(rows)
        }

        async fn save_if_not_outranked(&self, row: QuarterlyFinancial) -> Result<MergeOutcome> {
            let mut quarters = self.quarters.write().unwrap();
            let stored = quarters.get(&row.id).map(|q| q.source_priority);
            if !should_replace(stored, row.source_priority) {
                return Ok(MergeOutcome::Outranked {
                    key: row.key(),
                    stored_priority: stored.unwrap_or_default(),
                    incoming_priority: row.source_priority,
                });
            }
            let outcome = MergeOutcome::Written {
                key: row.key(),
                source_priority: row.source_priority,
            };
            quarters.insert(row.id.clone(), row);
            Ok(outcome)
        }

        async fn replace_ttm(&self, ttm: TtmFinancial) -> Result<()> {
            *self.ttm_writes.write().unwrap() += 1;
            self.ttm.write().unwrap().insert(ttm.company_id.clone(), ttm);
            Ok(())
        }

        fn get_ttm(&self, company_id: &str) -> Result<Option<TtmFinancial>> {
            Ok(self.ttm.read().unwrap().get(company_id).cloned())
        }
    }

    fn performance_filing(id: &str, title: &str, filed: NaiveDate, net_profit: Decimal) -> Filing {
        Filing {
            id: id.to_string(),
            company_id: "00126380".to_string(),
            ticker: Some("005930".to_string()),
            company_name: "삼성전자".to_string(),
            filed_at: filed,
            category: FilingCategory::Performance,
            subtype: "사업보고서".to_string(),
            title: title.to_string(),
            key_numbers: Some(KeyNumbers::Performance(PerformanceFigures {
                net_profit: Some(net_profit),
                revenue: Some(dec!(1000)),
                ..Default::default()
            })),
            source_url: String::new(),
            is_correction: false,
            created_at: Utc::now(),
        }
    }

    fn setup() -> (Arc<InMemoryFinancialRepository>, FinancialService) {
        let repo = Arc::new(InMemoryFinancialRepository::default());
        let service = FinancialService::new(repo.clone());
        (repo, service)
    }

    #[tokio::test]
    async fn higher_priority_overwrites_and_lower_priority_is_discarded() {
        let (repo, service) = setup();
        let jan = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let mar = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let key = QuarterKey::new("00126380", 2024, 4);

        let prelim = performance_filing("f1", "2024 연결 잠정실적", jan, dec!(100));
        let outcome = service.merge_performance_filing(&prelim).await.unwrap();
        assert_eq!(
            outcome,
            MergeOutcome::Written {
                key: key.clone(),
                source_priority: PRIORITY_PRELIMINARY
            }
        );

        let annual = performance_filing("f2", "사업보고서 (2024.12)", mar, dec!(120));
        service.merge_performance_filing(&annual).await.unwrap();
        let stored = repo.get_quarter(&key).unwrap().unwrap();
        assert_eq!(stored.net_profit, Some(dec!(120)));
        assert_eq!(stored.source_priority, PRIORITY_ANNUAL);

        // an interim-priority write for the same key loses as a whole row
        let interim = build_quarter_update(
            "00126380",
            "f3",
            ReportPeriod {
                year: 2024,
                quarter: 4,
                priority: PRIORITY_INTERIM,
            },
            Some(&PerformanceFigures {
                net_profit: Some(dec!(90)),
                ..Default::default()
            }),
            Utc::now(),
        );
        let outcome = repo.save_if_not_outranked(interim).await.unwrap();
        assert!(!outcome.is_written());

        let stored = repo.get_quarter(&key).unwrap().unwrap();
        assert_eq!(stored.net_profit, Some(dec!(120)));
        assert_eq!(stored.source_priority, PRIORITY_ANNUAL);
        assert_eq!(stored.source_filing_id.as_deref(), Some("f2"));
    }

    #[tokio::test]
    async fn accepted_write_recomputes_ttm() {
        let (repo, service) = setup();
        let filed = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();

        let q1 = performance_filing("f1", "2024년 1분기보고서", filed, dec!(10));
        service.merge_performance_filing(&q1).await.unwrap();

        let ttm = service.get_ttm("00126380").unwrap().unwrap();
        assert_eq!(ttm.net_profit_ttm, Some(dec!(10)));
        assert_eq!(ttm.revenue_ttm, Some(dec!(1000)));
        assert_eq!((ttm.last_quarter_year, ttm.last_quarter), (2024, 1));
        assert_eq!(*repo.ttm_writes.read().unwrap(), 1);
    }

    #[tokio::test]
    async fn outranked_write_leaves_ttm_alone() {
        let (repo, service) = setup();
        let mar = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        let annual = performance_filing("f1", "사업보고서 (2024.12)", mar, dec!(120));
        service.merge_performance_filing(&annual).await.unwrap();
        let prelim = performance_filing("f2", "2024 잠정실적", mar, dec!(100));
        let outcome = service.merge_performance_filing(&prelim).await.unwrap();

        assert!(matches!(outcome, MergeOutcome::Outranked { .. }));
        assert_eq!(*repo.ttm_writes.read().unwrap(), 1);
    }

    #[tokio::test]
    async fn titles_without_a_period_are_not_merged() {
        let (repo, service) = setup();
        let filed = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let filing = performance_filing("f1", "연결재무제표 기준 매출액 변동", filed, dec!(1));

        let outcome = service.merge_performance_filing(&filing).await.unwrap();
        assert_eq!(outcome, MergeOutcome::NotMergeable);
        assert!(repo.quarters.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn recompute_without_quarters_is_a_no_op() {
        let (repo, service) = setup();
        assert!(service.recompute_ttm("nobody").await.unwrap().is_none());
        assert_eq!(*repo.ttm_writes.read().unwrap(), 0);
    }

    #[tokio::test]
    async fn quarters_come_back_newest_first() {
        let (_repo, service) = setup();
        let filed = NaiveDate::from_ymd_opt(2024, 11, 14).unwrap();
        for (id, title) in [
            ("f1", "2024년 1분기보고서"),
            ("f2", "사업보고서 (2023.12)"),
            ("f3", "2024년 3분기보고서"),
        ] {
            let filing = performance_filing(id, title, filed, dec!(10));
            service.merge_performance_filing(&filing).await.unwrap();
        }

        let periods: Vec<(i32, i32)> = service
            .get_quarters("00126380", 2)
            .unwrap()
            .iter()
            .map(|q| (q.year, q.quarter))
            .collect();
        assert_eq!(periods, vec![(2024, 3), (2024, 1)]);
        assert_eq!(service.get_quarters("00126380", 10).unwrap().len(), 3);
        assert!(service.get_quarters("nobody", 10).unwrap().is_empty());
    }
}
