//! Exchange OpenAPI daily-trade JSON shape (`OutBlock_1` rows).

use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::FeedError;
use crate::models::PriceRecord;
use crate::normalize::{parse_number, parse_trade_date, parse_volume};

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(rename = "OutBlock_1", default)]
    rows: Vec<ApiRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct ApiRow {
    bas_dd: Option<String>,
    isu_srt_cd: Option<String>,
    isu_cd: Option<String>,
    isu_nm: Option<String>,
    mkt_nm: Option<String>,
    tdd_opnprc: Option<String>,
    tdd_hgprc: Option<String>,
    tdd_lwprc: Option<String>,
    tdd_clsprc: Option<String>,
    acc_trdvol: Option<String>,
    mktcap: Option<String>,
}

impl ApiRow {
    fn into_record(self, fallback_date: NaiveDate) -> Option<PriceRecord> {
        let ticker = self
            .isu_srt_cd
            .or(self.isu_cd)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())?;
        let trade_date = self
            .bas_dd
            .as_deref()
            .and_then(parse_trade_date)
            .unwrap_or(fallback_date);
        let number = |v: Option<String>| v.as_deref().and_then(parse_number);

        Some(PriceRecord {
            ticker,
            trade_date,
            open: number(self.tdd_opnprc),
            high: number(self.tdd_hgprc),
            low: number(self.tdd_lwprc),
            close: number(self.tdd_clsprc),
            volume: self.acc_trdvol.as_deref().and_then(parse_volume),
            market_cap: number(self.mktcap),
            company_name: self.isu_nm.filter(|s| !s.trim().is_empty()),
            market: self.mkt_nm,
        })
    }
}

/// Decodes an OpenAPI response body. Rows without a ticker are dropped.
pub fn parse_api_response(
    body: &str,
    fallback_date: NaiveDate,
) -> Result<Vec<PriceRecord>, FeedError> {
    let response: ApiResponse = serde_json::from_str(body)?;
    Ok(response
        .rows
        .into_iter()
        .filter_map(|row| row.into_record(fallback_date))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decodes_out_block_rows() {
        let body = r#"{"OutBlock_1":[
            {"BAS_DD":"20250314","ISU_SRT_CD":"005930","ISU_NM":"삼성전자","MKT_NM":"KOSPI",
             "TDD_OPNPRC":"55,000","TDD_HGPRC":"56,100","TDD_LWPRC":"54,800","TDD_CLSPRC":"55,900",
             "ACC_TRDVOL":"12,345,678","MKTCAP":"333,708,000,000,000"},
            {"ISU_CD":"000660","ISU_NM":"SK하이닉스","TDD_CLSPRC":"-"},
            {"ISU_NM":"코드없음","TDD_CLSPRC":"100"}
        ]}"#;
        let fallback = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let rows = parse_api_response(body, fallback).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ticker, "005930");
        assert_eq!(rows[0].trade_date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(rows[0].close, Some(dec!(55900)));
        assert_eq!(rows[0].volume, Some(12_345_678));
        assert_eq!(rows[0].market_cap, Some(dec!(333708000000000)));

        assert_eq!(rows[1].trade_date, fallback);
        assert_eq!(rows[1].close, None);
    }

    #[test]
    fn missing_block_is_empty() {
        let fallback = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        assert!(parse_api_response("{}", fallback).unwrap().is_empty());
    }
}
