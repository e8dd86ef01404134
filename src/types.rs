//! Shared types for the ARBVIEW dashboard.
//!
//! These mirror the JSON payloads of the scanner service. Wire field names
//! are snake_case, so no renaming is needed beyond the enums.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Scanner configuration
// ---------------------------------------------------------------------------

/// Scanner configuration returned by `GET /api/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub min_profit_percent: f64,
    #[serde(default)]
    pub supported_exchanges: Vec<String>,
}

impl ScanConfig {
    /// Threshold formatted for display, e.g. `0.5%`.
    pub fn threshold_label(&self) -> String {
        format!("{}%", self.min_profit_percent)
    }
}

// ---------------------------------------------------------------------------
// Opportunity
// ---------------------------------------------------------------------------

/// Locally assigned identifier for an opportunity.
///
/// The scanner does not identify its results, so ids are minted when a
/// scan response is accepted (see [`ScanResult::assign_ids`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OpportunityId(pub Uuid);

impl OpportunityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One candidate arbitrage trade sequence with its computed outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    /// Assigned locally by [`ScanResult::assign_ids`]; never read from the wire.
    #[serde(skip_deserializing)]
    pub id: OpportunityId,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub trade_path: Vec<String>,
    #[serde(default)]
    pub start_amount: f64,
    #[serde(default)]
    pub start_coin: String,
    #[serde(default)]
    pub end_amount: f64,
    #[serde(default)]
    pub end_coin: String,
    #[serde(default)]
    pub fees_str: Option<String>,
    #[serde(default)]
    pub profit_percent: f64,
    #[serde(default)]
    pub status: OpportunityStatus,
    #[serde(default)]
    pub fee_breakdown: Option<Vec<FeeStep>>,
}

impl Opportunity {
    /// Whether two entries describe the same trade, ignoring the local id.
    pub fn same_trade(&self, other: &Opportunity) -> bool {
        self.exchange == other.exchange
            && self.timestamp == other.timestamp
            && self.trade_path == other.trade_path
            && self.start_coin == other.start_coin
            && self.end_coin == other.end_coin
            && self.start_amount == other.start_amount
            && self.end_amount == other.end_amount
            && self.profit_percent == other.profit_percent
    }

    /// Fee steps, treating an absent breakdown as empty.
    pub fn fee_steps(&self) -> &[FeeStep] {
        self.fee_breakdown.as_deref().unwrap_or(&[])
    }
}

/// Opportunity timestamp as sent by the scanner.
///
/// The service emits ISO-8601 strings (usually without an offset, meaning
/// scanner-local wall time); epoch milliseconds are accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(f64),
    Text(String),
}

impl Timestamp {
    /// Local wall-clock time (`HH:MM:SS`), or `None` if unparseable.
    pub fn local_time(&self) -> Option<String> {
        const FORMAT: &str = "%H:%M:%S";
        match self {
            Timestamp::Millis(ms) => Local
                .timestamp_millis_opt(*ms as i64)
                .single()
                .map(|dt| dt.format(FORMAT).to_string()),
            Timestamp::Text(s) => {
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Some(dt.with_timezone(&Local).format(FORMAT).to_string());
                }
                ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .map(|naive| naive.format(FORMAT).to_string())
            }
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Millis(ms) => write!(f, "{ms}"),
            Timestamp::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Outcome classification assigned by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum OpportunityStatus {
    Profitable,
    Loss,
    LowProfit,
    /// Anything else, keeping the raw wire value (empty when absent).
    Unknown(String),
}

impl Default for OpportunityStatus {
    fn default() -> Self {
        OpportunityStatus::Unknown(String::new())
    }
}

impl From<Option<String>> for OpportunityStatus {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref() {
            Some("PROFITABLE") => OpportunityStatus::Profitable,
            Some("LOSS") => OpportunityStatus::Loss,
            Some("LOW_PROFIT") => OpportunityStatus::LowProfit,
            _ => OpportunityStatus::Unknown(raw.unwrap_or_default()),
        }
    }
}

impl From<OpportunityStatus> for String {
    fn from(status: OpportunityStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for OpportunityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpportunityStatus::Profitable => write!(f, "PROFITABLE"),
            OpportunityStatus::Loss => write!(f, "LOSS"),
            OpportunityStatus::LowProfit => write!(f, "LOW_PROFIT"),
            OpportunityStatus::Unknown(raw) if raw.is_empty() => write!(f, "UNKNOWN"),
            OpportunityStatus::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Fee breakdown
// ---------------------------------------------------------------------------

/// Per-step fee detail for one opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeStep {
    #[serde(default)]
    pub step: StepLabel,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub action: TradeAction,
    #[serde(default)]
    pub fee_percent: String,
}

/// Step label: a step number, or a textual hop such as `USDT -> BTC`.
///
/// Anything else the scanner sends is kept as-is rather than failing the
/// whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepLabel {
    Number(u64),
    Decimal(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for StepLabel {
    fn default() -> Self {
        StepLabel::Other(serde_json::Value::Null)
    }
}

impl fmt::Display for StepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepLabel::Number(n) => write!(f, "{n}"),
            StepLabel::Decimal(n) => write!(f, "{n}"),
            StepLabel::Text(s) => write!(f, "{s}"),
            StepLabel::Other(serde_json::Value::Null) => Ok(()),
            StepLabel::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Order side of a fee step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeAction {
    Buy,
    Sell,
    Other(String),
}

impl Default for TradeAction {
    fn default() -> Self {
        TradeAction::Other(String::new())
    }
}

impl From<String> for TradeAction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "BUY" => TradeAction::Buy,
            "SELL" => TradeAction::Sell,
            _ => TradeAction::Other(raw),
        }
    }
}

impl From<TradeAction> for String {
    fn from(action: TradeAction) -> Self {
        action.to_string()
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
            TradeAction::Other(raw) => write!(f, "{raw}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Scan request / result
// ---------------------------------------------------------------------------

/// Body of `POST /api/scan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub exchanges: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Success,
    #[serde(other)]
    Error,
}

/// Response of `POST /api/scan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub status: ScanStatus,
    #[serde(default)]
    pub message: Option<String>,
    /// Profitable subset.
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    /// Every analysed path.
    #[serde(default)]
    pub all_opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_analyzed: Option<u64>,
}

impl ScanResult {
    /// Mint stable ids for every opportunity.
    ///
    /// Entries of the profitable list that describe the same trade as an
    /// entry of the full list share that entry's id.
    pub fn assign_ids(&mut self) {
        for op in &mut self.all_opportunities {
            op.id = OpportunityId::new();
        }
        for op in &mut self.opportunities {
            op.id = self
                .all_opportunities
                .iter()
                .find(|full| full.same_trade(op))
                .map(|full| full.id)
                .unwrap_or_else(OpportunityId::new);
        }
    }

    /// Total analysed paths, falling back to the full list length.
    pub fn total_analyzed(&self) -> u64 {
        self.total_analyzed
            .unwrap_or(self.all_opportunities.len() as u64)
    }

    /// Look up an opportunity by its stable id.
    ///
    /// An id can name an entry in both lists; the one carrying a fee
    /// breakdown wins, otherwise the full-list entry.
    pub fn find(&self, id: OpportunityId) -> Option<&Opportunity> {
        let mut matches = self
            .all_opportunities
            .iter()
            .chain(self.opportunities.iter())
            .filter(|op| op.id == id);
        let first = matches.next()?;
        if !first.fee_steps().is_empty() {
            return Some(first);
        }
        matches.find(|op| !op.fee_steps().is_empty()).or(Some(first))
    }

    /// The list behind one of the two table views.
    pub fn list(&self, view: TableView) -> &[Opportunity] {
        match view {
            TableView::Profitable => &self.opportunities,
            TableView::All => &self.all_opportunities,
        }
    }
}

/// The two result tables on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableView {
    /// Profitable opportunities only.
    Profitable,
    /// Every analysed path.
    All,
}

impl TableView {
    pub fn from_flag(only_profitable: bool) -> Self {
        if only_profitable {
            TableView::Profitable
        } else {
            TableView::All
        }
    }

    pub fn is_profitable(&self) -> bool {
        matches!(self, TableView::Profitable)
    }

    /// DOM id of the table body.
    pub fn element_id(&self) -> &'static str {
        match self {
            TableView::Profitable => "results-body",
            TableView::All => "all-results-body",
        }
    }
}

/// Summary of a successful scan, for callers and logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSummary {
    pub profitable: u64,
    pub total_analyzed: u64,
}

impl ScanResult {
    /// A one-profitable, two-analysed scan payload for tests.
    #[cfg(test)]
    pub fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "status": "success",
            "count": 1,
            "total_analyzed": 2,
            "opportunities": [{
                "exchange": "Binance",
                "timestamp": "2026-02-21T12:34:56.789012",
                "trade_path": ["USDT -> BTC", "BTC -> ETH", "ETH -> USDT"],
                "start_amount": 100.0,
                "start_coin": "USDT",
                "end_amount": 102.3,
                "end_coin": "USDT",
                "fees_str": "0.10%",
                "profit_percent": 2.3,
                "status": "PROFITABLE",
                "fee_breakdown": [
                    {"step": 1, "symbol": "BTCUSDT", "action": "BUY", "fee_percent": "0.100%"},
                    {"step": 2, "symbol": "ETHBTC", "action": "BUY", "fee_percent": "0.100%"},
                    {"step": 3, "symbol": "ETHUSDT", "action": "SELL", "fee_percent": "0.100%"}
                ]
            }],
            "all_opportunities": [
                {
                    "exchange": "Binance",
                    "timestamp": "2026-02-21T12:34:56.789012",
                    "trade_path": ["USDT -> BTC", "BTC -> ETH", "ETH -> USDT"],
                    "start_amount": 100.0,
                    "start_coin": "USDT",
                    "end_amount": 102.3,
                    "end_coin": "USDT",
                    "profit_percent": 2.3,
                    "status": "PROFITABLE"
                },
                {
                    "exchange": "Kraken",
                    "timestamp": "2026-02-21T12:34:57",
                    "trade_path": ["USDT -> XRP", "XRP -> USDT"],
                    "start_amount": 100.0,
                    "start_coin": "USDT",
                    "end_amount": 99.4,
                    "end_coin": "USDT",
                    "profit_percent": -0.6,
                    "status": "LOSS"
                }
            ]
        })
    }

    #[cfg(test)]
    pub fn sample() -> Self {
        let mut result: ScanResult = serde_json::from_value(Self::sample_json())
            .expect("sample payload is valid");
        result.assign_ids();
        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
