/// Decimal places kept for ratio and percentage metrics
pub const METRIC_DECIMAL_PRECISION: u32 = 2;

/// Decimal places kept for peer percentiles
pub const PERCENTILE_DECIMAL_PRECISION: u32 = 1;

/// Score assigned when no metric could be ranked
pub const NEUTRAL_SCORE: i32 = 50;

/// Peer bucket for companies without a usable mapping
pub const UNCLASSIFIED_PEER_CODE: &str = "OTHER";

/// Default cooperative runtime budget for one batch invocation
pub const DEFAULT_RUNTIME_BUDGET_MS: u64 = 25_000;

/// Default cap on companies scored per valuation run
pub const DEFAULT_MAX_COMPANIES: usize = 500;

/// Number of quarters rolled into a trailing-twelve-month figure
pub const TTM_QUARTERS: usize = 4;

/// Prefix for company ids synthesized from a bare exchange ticker
pub const EXCHANGE_COMPANY_ID_PREFIX: &str = "KRX_";

/// Viewer link for a filing receipt number
pub const FILING_VIEWER_URL: &str = "https://dart.fss.or.kr/dsaf001/main.do?rcpNo=";
