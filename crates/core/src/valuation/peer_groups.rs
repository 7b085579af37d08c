//! Peer group catalogue and automatic assignment rules.

use serde::Serialize;

use crate::constants::UNCLASSIFIED_PEER_CODE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerGroup {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const PEER_GROUPS: &[PeerGroup] = &[
    PeerGroup { code: "SEMI", name: "반도체", description: "반도체 설계, 제조, 장비" },
    PeerGroup { code: "IT_SW", name: "IT/소프트웨어", description: "소프트웨어, 인터넷, 플랫폼" },
    PeerGroup { code: "BIO", name: "바이오/헬스케어", description: "제약, 바이오, 의료기기" },
    PeerGroup { code: "AUTO", name: "자동차/부품", description: "완성차, 자동차 부품" },
    PeerGroup { code: "CHEM", name: "화학/에너지", description: "화학, 정유, 2차전지" },
    PeerGroup { code: "SHIP", name: "조선/해운", description: "조선, 해운, 중공업" },
    PeerGroup { code: "STEEL", name: "철강/금속", description: "철강, 비철금속" },
    PeerGroup { code: "CONST", name: "건설/건자재", description: "건설, 시멘트, 건자재" },
    PeerGroup { code: "BANK", name: "은행/보험", description: "은행, 보험, 카드" },
    PeerGroup { code: "SEC", name: "증권/금융", description: "증권, 자산운용" },
    PeerGroup { code: "RETAIL", name: "유통/소매", description: "백화점, 마트, 이커머스" },
    PeerGroup { code: "FOOD", name: "음식료", description: "식품, 음료" },
    PeerGroup { code: "TELCO", name: "통신", description: "이동통신, 유선통신" },
    PeerGroup { code: "UTIL", name: "전력/가스", description: "전력, 가스, 유틸리티" },
    PeerGroup { code: "MEDIA", name: "미디어/엔터", description: "방송, 게임, 엔터테인먼트" },
    PeerGroup { code: "TRANS", name: "운송/물류", description: "항공, 육운, 물류" },
    PeerGroup { code: "MACH", name: "기계/장비", description: "산업기계, 전기장비" },
    PeerGroup { code: UNCLASSIFIED_PEER_CODE, name: "기타", description: "분류 미정" },
];

/// Exchange industry code to peer group, exact match.
const INDUSTRY_RULES: &[(&str, &str)] = &[
    ("G25", "SEMI"),
    ("G26", "SEMI"),
    ("G27", "IT_SW"),
    ("G28", "IT_SW"),
    ("G29", "IT_SW"),
    ("G31", "BIO"),
    ("G32", "BIO"),
    ("G35", "AUTO"),
    ("G36", "AUTO"),
    ("G41", "CHEM"),
    ("G42", "CHEM"),
    ("G45", "STEEL"),
    ("G51", "CONST"),
    ("G61", "BANK"),
    ("G62", "SEC"),
    ("G63", "BANK"),
    ("G71", "RETAIL"),
    ("G72", "FOOD"),
    ("G81", "TELCO"),
    ("G82", "MEDIA"),
];

/// Hand-curated assignments for large caps, keyed by ticker.
const CURATED_TICKERS: &[(&str, &str)] = &[
    ("005930", "SEMI"),
    ("000660", "SEMI"),
    ("035720", "IT_SW"),
    ("035420", "IT_SW"),
    ("263750", "IT_SW"),
    ("112040", "IT_SW"),
    ("068270", "BIO"),
    ("207940", "BIO"),
    ("091990", "BIO"),
    ("326030", "BIO"),
    ("005380", "AUTO"),
    ("000270", "AUTO"),
    ("012330", "AUTO"),
    ("051910", "CHEM"),
    ("096770", "CHEM"),
    ("006400", "CHEM"),
    ("373220", "CHEM"),
    ("009540", "SHIP"),
    ("010140", "SHIP"),
    ("042660", "SHIP"),
    ("011200", "SHIP"),
    ("005490", "STEEL"),
    ("000720", "CONST"),
    ("028260", "CONST"),
    ("105560", "BANK"),
    ("055550", "BANK"),
    ("086790", "BANK"),
    ("316140", "BANK"),
    ("033780", "SEC"),
    ("032830", "SEC"),
    ("004990", "RETAIL"),
    ("139480", "RETAIL"),
    ("097950", "FOOD"),
    ("271560", "FOOD"),
    ("017670", "TELCO"),
    ("030200", "TELCO"),
    ("032640", "TELCO"),
    ("015760", "UTIL"),
    ("352820", "MEDIA"),
    ("041510", "MEDIA"),
    ("035900", "MEDIA"),
    ("122870", "MEDIA"),
];

pub fn find_peer_group(code: &str) -> Option<&'static PeerGroup> {
    PEER_GROUPS.iter().find(|g| g.code == code)
}

pub fn peer_for_industry(industry_code: &str) -> Option<&'static str> {
    INDUSTRY_RULES
        .iter()
        .find(|(code, _)| *code == industry_code.trim())
        .map(|(_, peer)| *peer)
}

/// Automatic peer for a company: curated ticker, then industry rule, then
/// the unclassified bucket.
pub fn resolve_auto_peer(ticker: &str, industry_code: Option<&str>) -> &'static str {
    CURATED_TICKERS
        .iter()
        .find(|(t, _)| *t == ticker)
        .map(|(_, peer)| *peer)
        .or_else(|| industry_code.and_then(peer_for_industry))
        .unwrap_or(UNCLASSIFIED_PEER_CODE)
}
