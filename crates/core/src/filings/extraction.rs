//! Best-effort extraction of key figures from filing titles.
//!
//! Each category has a handful of patterns. A pattern that does not match
//! leaves its field unset; nothing here fails.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::filings_model::{
    CapitalFigures, ContractFigures, FilingCategory, KeyNumbers, PerformanceFigures,
    ShareholderReturnFigures,
};

lazy_static! {
    static ref REVENUE: Regex = Regex::new(r"매출액?\s*[:\s]*([0-9,]+)\s*(조|억)").unwrap();
    static ref OPERATING_PROFIT: Regex = Regex::new(r"영업이익\s*[:\s]*([0-9,]+)\s*(조|억)").unwrap();
    static ref NET_PROFIT: Regex = Regex::new(r"(?:당기)?순이익\s*[:\s]*([0-9,]+)\s*(조|억)").unwrap();
    static ref REVENUE_YOY: Regex = Regex::new(r"전년\s*대비\s*([+-]?\d+\.?\d*)\s*%").unwrap();
    static ref TOTAL_EQUITY: Regex = Regex::new(r"자본총계\s*[:\s]*([0-9,]+)\s*(조|억)").unwrap();
    static ref TOTAL_DEBT: Regex = Regex::new(r"부채총계\s*[:\s]*([0-9,]+)\s*(조|억)").unwrap();
    static ref TOTAL_ASSETS: Regex = Regex::new(r"자산총계\s*[:\s]*([0-9,]+)\s*(조|억)").unwrap();
    static ref CONTRACT_AMOUNT: Regex = Regex::new(r"계약금액?\s*[:\s]*([0-9,]+)\s*(조|억)").unwrap();
    static ref CONTRACT_RATIO: Regex = Regex::new(r"매출액?\s*대비\s*([0-9.]+)\s*%").unwrap();
    static ref DIVIDEND_PER_SHARE: Regex = Regex::new(r"주당\s*배당금?\s*[:\s]*([0-9,]+)\s*원").unwrap();
    static ref DIVIDEND_YIELD: Regex = Regex::new(r"배당수익률?\s*[:\s]*([0-9.]+)\s*%").unwrap();
    static ref RAISE_AMOUNT: Regex = Regex::new(r"([0-9,]+)\s*(조|억)\s*원?\s*(증자|발행)").unwrap();
}

/// Multiplier for a Korean magnitude suffix.
pub fn magnitude(unit: &str) -> Decimal {
    match unit {
        "조" => dec!(1000000000000),
        "억" => dec!(100000000),
        "만" => dec!(10000),
        _ => Decimal::ONE,
    }
}

/// Parses `"1,234"` plus a magnitude suffix into an absolute amount.
pub fn parse_korean_amount(digits: &str, unit: &str) -> Option<Decimal> {
    let cleaned = digits.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok().map(|v| v * magnitude(unit))
}

fn amount(re: &Regex, text: &str) -> Option<Decimal> {
    let caps = re.captures(text)?;
    let digits = caps.get(1)?.as_str();
    let unit = caps.get(2).map_or("", |m| m.as_str());
    parse_korean_amount(digits, unit)
}

fn won(re: &Regex, text: &str) -> Option<Decimal> {
    let caps = re.captures(text)?;
    Decimal::from_str(&caps.get(1)?.as_str().replace(',', "")).ok()
}

fn percent(re: &Regex, text: &str) -> Option<Decimal> {
    let caps = re.captures(text)?;
    let raw = caps.get(1)?.as_str();
    Decimal::from_str(raw.strip_prefix('+').unwrap_or(raw)).ok()
}

/// Extracts category-specific figures. Returns `None` when the category has
/// no patterns or none of them matched.
pub fn extract_key_numbers(category: FilingCategory, text: &str) -> Option<KeyNumbers> {
    let numbers = match category {
        FilingCategory::Performance => KeyNumbers::Performance(PerformanceFigures {
            revenue: amount(&REVENUE, text),
            operating_profit: amount(&OPERATING_PROFIT, text),
            net_profit: amount(&NET_PROFIT, text),
            revenue_yoy: percent(&REVENUE_YOY, text),
            total_equity: amount(&TOTAL_EQUITY, text),
            total_debt: amount(&TOTAL_DEBT, text),
            total_assets: amount(&TOTAL_ASSETS, text),
        }),
        FilingCategory::OrderContract => KeyNumbers::OrderContract(ContractFigures {
            contract_amount: amount(&CONTRACT_AMOUNT, text),
            revenue_ratio: percent(&CONTRACT_RATIO, text),
        }),
        FilingCategory::ShareholderReturn => {
            KeyNumbers::ShareholderReturn(ShareholderReturnFigures {
                dividend_per_share: won(&DIVIDEND_PER_SHARE, text),
                dividend_yield: percent(&DIVIDEND_YIELD, text),
            })
        }
        FilingCategory::CapitalAction => KeyNumbers::CapitalAction(CapitalFigures {
            raise_amount: amount(&RAISE_AMOUNT, text),
        }),
        FilingCategory::Governance | FilingCategory::Risk | FilingCategory::Other => {
            return None
        }
    };
    (!numbers.is_empty()).then_some(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_magnitude_suffixes() {
        assert_eq!(parse_korean_amount("3", "조"), Some(dec!(3000000000000)));
        assert_eq!(parse_korean_amount("1,234", "억"), Some(dec!(123400000000)));
        assert_eq!(parse_korean_amount("15", "만"), Some(dec!(150000)));
        assert_eq!(parse_korean_amount(",", "억"), None);
    }

    #[test]
    fn extracts_performance_figures() {
        let title = "영업(잠정)실적(공정공시) 매출액: 1,500억, 영업이익 120억, 전년 대비 +15.3%";
        let numbers = extract_key_numbers(FilingCategory::Performance, title).unwrap();
        let figures = numbers.performance().unwrap();

        assert_eq!(figures.revenue, Some(dec!(150000000000)));
        assert_eq!(figures.operating_profit, Some(dec!(12000000000)));
        assert_eq!(figures.revenue_yoy, Some(dec!(15.3)));
        assert_eq!(figures.net_profit, None);
    }

    #[test]
    fn extracts_net_profit_and_balance_sheet() {
        let title = "사업보고서 당기순이익 2조, 자본총계 30조, 부채총계 12조";
        let numbers = extract_key_numbers(FilingCategory::Performance, title).unwrap();
        let figures = numbers.performance().unwrap();

        assert_eq!(figures.net_profit, Some(dec!(2000000000000)));
        assert_eq!(figures.total_equity, Some(dec!(30000000000000)));
        assert_eq!(figures.total_debt, Some(dec!(12000000000000)));
        assert_eq!(figures.total_assets, None);
    }

    #[test]
    fn extracts_contract_figures() {
        let title = "단일판매·공급계약체결 (계약금액 1,234억원, 매출액 대비 12.5%)";
        assert_eq!(
            extract_key_numbers(FilingCategory::OrderContract, title),
            Some(KeyNumbers::OrderContract(ContractFigures {
                contract_amount: Some(dec!(123400000000)),
                revenue_ratio: Some(dec!(12.5)),
            }))
        );
    }

    #[test]
    fn extracts_dividend_figures() {
        let title = "현금ㆍ현물배당결정 (주당 배당금 1,444원, 배당수익률 2.1%)";
        assert_eq!(
            extract_key_numbers(FilingCategory::ShareholderReturn, title),
            Some(KeyNumbers::ShareholderReturn(ShareholderReturnFigures {
                dividend_per_share: Some(dec!(1444)),
                dividend_yield: Some(dec!(2.1)),
            }))
        );
    }

    #[test]
    fn extracts_capital_raise() {
        let title = "유상증자결정 (500억원 증자)";
        assert_eq!(
            extract_key_numbers(FilingCategory::CapitalAction, title),
            Some(KeyNumbers::CapitalAction(CapitalFigures {
                raise_amount: Some(dec!(50000000000)),
            }))
        );
    }

    #[test]
    fn unmatched_titles_yield_nothing() {
        assert_eq!(
            extract_key_numbers(FilingCategory::Performance, "2024년 1분기보고서"),
            None
        );
        assert_eq!(
            extract_key_numbers(FilingCategory::Governance, "대표이사 변경 1,000억"),
            None
        );
    }
}
