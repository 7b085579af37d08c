//! Rule-table classification of filing titles.
//!
//! Pure functions, no I/O. Rules are evaluated top to bottom and the first
//! category with a matching trigger wins; matching is a case-sensitive
//! substring test against the title.

use lazy_static::lazy_static;
use regex::Regex;

use super::filings_model::{Classification, FilingCategory};

/// Ordered `(category, triggers)` table. `Other` has no triggers and is the fallback.
pub const CATEGORY_RULES: &[(FilingCategory, &[&str])] = &[
    (
        FilingCategory::Performance,
        &[
            "사업보고서",
            "분기보고서",
            "반기보고서",
            "잠정실적",
            "매출액",
            "영업이익",
            "실적",
            "연결재무",
            "재무제표",
        ],
    ),
    (
        FilingCategory::OrderContract,
        &["수주", "계약", "공급계약", "납품", "공급", "용역계약", "라이선스"],
    ),
    (
        FilingCategory::CapitalAction,
        &[
            "유상증자",
            "무상증자",
            "증자",
            "감자",
            "전환사채",
            "CB",
            "BW",
            "신주인수권",
            "주식매수선택권",
            "신주",
        ],
    ),
    (
        FilingCategory::ShareholderReturn,
        &["배당", "현금배당", "자사주", "자기주식", "주식소각", "주주환원"],
    ),
    (
        FilingCategory::Governance,
        &[
            "임원",
            "이사회",
            "주총",
            "주주총회",
            "최대주주",
            "대표이사",
            "감사",
            "사외이사",
        ],
    ),
    (
        FilingCategory::Risk,
        &[
            "소송",
            "횡령",
            "배임",
            "감사의견",
            "비적정",
            "상장폐지",
            "관리종목",
            "회생",
            "파산",
            "부도",
            "거래정지",
        ],
    ),
];

/// Known subtype phrases, most specific report types first.
const KNOWN_SUBTYPES: &[&str] = &[
    "사업보고서",
    "반기보고서",
    "분기보고서",
    "잠정실적",
    "주요사항보고서",
    "공급계약",
    "수주공시",
    "배당결정",
    "증자결정",
    "자기주식취득",
];

pub const DEFAULT_SUBTYPE: &str = "일반공시";

const REMARK_CORRECTION_MARKER: &str = "정정";
const TITLE_CORRECTION_MARKER: &str = "[정정]";

lazy_static! {
    static ref BRACKETED: Regex = Regex::new(r"\[([^\]]+)\]").expect("valid bracket pattern");
}

pub fn classify_category(title: &str) -> FilingCategory {
    CATEGORY_RULES
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| title.contains(t)))
        .map(|(category, _)| *category)
        .unwrap_or(FilingCategory::Other)
}

pub fn extract_subtype(title: &str) -> String {
    if let Some(known) = KNOWN_SUBTYPES.iter().find(|s| title.contains(*s)) {
        return (*known).to_string();
    }
    BRACKETED
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SUBTYPE.to_string())
}

pub fn is_correction(title: &str, remark: Option<&str>) -> bool {
    remark.is_some_and(|r| r.contains(REMARK_CORRECTION_MARKER))
        || title.contains(TITLE_CORRECTION_MARKER)
}

pub fn classify(title: &str, remark: Option<&str>) -> Classification {
    Classification {
        category: classify_category(title),
        subtype: extract_subtype(title),
        is_correction: is_correction(title, remark),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_titles_by_first_matching_rule() {
        let cases: &[(&str, FilingCategory)] = &[
            ("2024년 1분기보고서", FilingCategory::Performance),
            ("사업보고서 (2023.12)", FilingCategory::Performance),
            ("연결재무제표기준영업(잠정)실적(공정공시)", FilingCategory::Performance),
            ("단일판매·공급계약체결", FilingCategory::OrderContract),
            ("유상증자결정", FilingCategory::CapitalAction),
            ("전환사채권발행결정", FilingCategory::CapitalAction),
            ("현금ㆍ현물배당결정", FilingCategory::ShareholderReturn),
            ("자기주식취득결정", FilingCategory::ShareholderReturn),
            ("임원ㆍ주요주주특정증권등소유상황보고서", FilingCategory::Governance),
            ("소송등의제기ㆍ신청", FilingCategory::Risk),
            ("주식등의대량보유상황보고서", FilingCategory::Other),
        ];
        for (title, expected) in cases {
            assert_eq!(classify_category(title), *expected, "title: {}", title);
        }
    }

    #[test]
    fn earlier_rules_shadow_later_ones() {
        // "감사" is a governance trigger, which is declared before risk
        assert_eq!(classify_category("감사의견거절"), FilingCategory::Governance);
        // a contract announcement mentioning revenue is still a performance filing
        assert_eq!(
            classify_category("공급계약 (매출액 대비 12%)"),
            FilingCategory::Performance
        );
    }

    #[test]
    fn triggers_are_case_sensitive() {
        assert_eq!(classify_category("CB 발행"), FilingCategory::CapitalAction);
        assert_eq!(classify_category("cb 발행"), FilingCategory::Other);
    }

    #[test]
    fn extracts_known_subtype_then_bracket_then_default() {
        assert_eq!(extract_subtype("2024년 1분기보고서"), "분기보고서");
        assert_eq!(extract_subtype("[기재정정]사업보고서 (2023.12)"), "사업보고서");
        assert_eq!(extract_subtype("[첨부추가]최대주주변경"), "첨부추가");
        assert_eq!(extract_subtype("최대주주변경"), DEFAULT_SUBTYPE);
        assert_eq!(extract_subtype("[ ]최대주주변경"), DEFAULT_SUBTYPE);
    }

    #[test]
    fn detects_corrections_from_remark_or_title() {
        assert!(is_correction("[정정]단일판매ㆍ공급계약체결", None));
        assert!(is_correction("단일판매ㆍ공급계약체결", Some("정정")));
        assert!(!is_correction("[기재정정]사업보고서", None));
        assert!(!is_correction("단일판매ㆍ공급계약체결", Some("유")));
    }

    #[test]
    fn classification_is_deterministic() {
        let title = "[정정]단일판매·공급계약체결";
        assert_eq!(classify(title, None), classify(title, None));
        let c = classify(title, None);
        assert_eq!(c.category, FilingCategory::OrderContract);
        assert_eq!(c.subtype, "공급계약");
        assert!(c.is_correction);
    }
}
