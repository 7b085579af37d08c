//! Exchange public CSV download shape.
//!
//! The download has localized headers whose exact wording varies between
//! screens, and sometimes a few title rows above the real header. Columns
//! are located through an alias table instead of fixed positions.

use chrono::NaiveDate;
use lazy_static::lazy_static;

use crate::errors::FeedError;
use crate::models::PriceRecord;
use crate::normalize::{normalize_header, parse_number, parse_trade_date, parse_volume};

/// How many leading rows are searched for a usable header.
const HEADER_SEARCH_ROWS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Column {
    Ticker,
    Name,
    TradeDate,
    Open,
    High,
    Low,
    Close,
    Volume,
    MarketCap,
}

lazy_static! {
    static ref COLUMN_ALIASES: Vec<(Column, Vec<String>)> = {
        let table: [(Column, &[&str]); 9] = [
            (Column::Ticker, &["종목코드", "단축코드", "코드", "isusrtcd", "isu_srt_cd", "isucd", "isu_cd", "표준코드"]),
            (Column::Name, &["종목명", "종목", "isunm", "isu_nm"]),
            (Column::TradeDate, &["일자", "거래일", "trddd", "trd_dd", "bas_dd", "기준일"]),
            (Column::Open, &["시가", "시가원", "opnprc", "tdd_opnprc"]),
            (Column::High, &["고가", "고가원", "hgprc", "tdd_hgprc"]),
            (Column::Low, &["저가", "저가원", "lwprc", "tdd_lwprc"]),
            (Column::Close, &["종가", "현재가", "clsprc", "tdd_clsprc"]),
            (Column::Volume, &["거래량", "거래량주", "acc_trdvol"]),
            (Column::MarketCap, &["시가총액", "시가총액원", "mktcap", "mkcap"]),
        ];
        table
            .iter()
            .map(|(col, aliases)| (*col, aliases.iter().map(|a| normalize_header(a)).collect()))
            .collect()
    };
}

#[derive(Debug, Default)]
struct HeaderIndex {
    positions: Vec<(Column, usize)>,
}

impl HeaderIndex {
    fn build(headers: &[String]) -> Self {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let positions = COLUMN_ALIASES
            .iter()
            .filter_map(|(col, aliases)| {
                aliases
                    .iter()
                    .find_map(|alias| normalized.iter().position(|h| h == alias))
                    .map(|idx| (*col, idx))
            })
            .collect();
        Self { positions }
    }

    fn get(&self, col: Column) -> Option<usize> {
        self.positions
            .iter()
            .find(|(c, _)| *c == col)
            .map(|(_, idx)| *idx)
    }

    fn is_usable(&self) -> bool {
        self.get(Column::Ticker).is_some() && self.get(Column::Close).is_some()
    }

    fn cell<'a>(&self, row: &'a [String], col: Column) -> Option<&'a str> {
        self.get(col)
            .and_then(|idx| row.get(idx))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Parses a public CSV download. Rows whose close price cannot be read are
/// dropped along with rows that have no ticker.
pub fn parse_public_csv(body: &str, fallback_date: NaiveDate) -> Result<Vec<PriceRecord>, FeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut table: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        table.push(record.iter().map(str::to_string).collect());
    }
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let header = table
        .iter()
        .take(HEADER_SEARCH_ROWS)
        .enumerate()
        .map(|(i, row)| (i, HeaderIndex::build(row)))
        .find(|(_, index)| index.is_usable());

    let Some((header_row, index)) = header else {
        return Err(FeedError::malformed(
            "KRX_CSV",
            "no header row with ticker and close columns",
        ));
    };

    Ok(table
        .iter()
        .skip(header_row + 1)
        .filter_map(|row| map_row(row, &index, fallback_date))
        .collect())
}

fn map_row(row: &[String], index: &HeaderIndex, fallback_date: NaiveDate) -> Option<PriceRecord> {
    let ticker = index.cell(row, Column::Ticker)?.to_string();
    let close = index.cell(row, Column::Close).and_then(parse_number)?;
    let trade_date = index
        .cell(row, Column::TradeDate)
        .and_then(parse_trade_date)
        .unwrap_or(fallback_date);
    let number = |col| index.cell(row, col).and_then(parse_number);

    Some(PriceRecord {
        ticker,
        trade_date,
        open: number(Column::Open),
        high: number(Column::High),
        low: number(Column::Low),
        close: Some(close),
        volume: index.cell(row, Column::Volume).and_then(parse_volume),
        market_cap: number(Column::MarketCap),
        company_name: index.cell(row, Column::Name).map(str::to_string),
        market: None,
    })
}
