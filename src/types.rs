//! Types for the CryptoCompare client

use crate::params::{join_list, SymbolList};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket size for historical OHLC data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One bar per day
    #[default]
    Day,
    /// One bar per hour
    Hour,
    /// One bar per minute
    Minute,
}

impl Period {
    /// Path segment appended to `histo`
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Hour => "hour",
            Period::Minute => "minute",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "hour" => Ok(Period::Hour),
            "minute" => Ok(Period::Minute),
            other => Err(format!("unknown period: {}", other)),
        }
    }
}

/// One time bucket of historical data
///
/// Bars arrive oldest first. `time` is the bucket's opening epoch second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, rename = "volumefrom")]
    pub volume_from: Option<f64>,
    #[serde(default, rename = "volumeto")]
    pub volume_to: Option<f64>,
}

/// Coin identifier accepted by the id-based endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoinId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinId::Numeric(id) => write!(f, "{}", id),
            CoinId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for CoinId {
    fn from(id: i64) -> Self {
        CoinId::Numeric(id)
    }
}

impl From<u32> for CoinId {
    fn from(id: u32) -> Self {
        CoinId::Numeric(id.into())
    }
}

impl From<i32> for CoinId {
    fn from(id: i32) -> Self {
        CoinId::Numeric(id.into())
    }
}

impl From<&str> for CoinId {
    fn from(id: &str) -> Self {
        CoinId::Text(id.to_string())
    }
}

impl From<String> for CoinId {
    fn from(id: String) -> Self {
        CoinId::Text(id)
    }
}

/// Upper bound for the news feed cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Before {
    /// Absolute UTC time
    Utc(DateTime<Utc>),
    /// Calendar time without zone, read as UTC
    Naive(NaiveDateTime),
    /// Epoch seconds, possibly fractional
    Epoch(f64),
}

impl From<DateTime<Utc>> for Before {
    fn from(dt: DateTime<Utc>) -> Self {
        Before::Utc(dt)
    }
}

impl From<NaiveDateTime> for Before {
    fn from(dt: NaiveDateTime) -> Self {
        Before::Naive(dt)
    }
}

impl From<i64> for Before {
    fn from(secs: i64) -> Self {
        Before::Epoch(secs as f64)
    }
}

impl From<f64> for Before {
    fn from(secs: f64) -> Self {
        Before::Epoch(secs)
    }
}

/// Options for the historical data endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalQuery {
    pub period: Period,
    pub exchange: Option<String>,
    pub limit: Option<u32>,
    pub to_ts: Option<i64>,
}

impl HistoricalQuery {
    /// Creates a query for the given period with no other options
    pub fn new(period: Period) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    /// Restricts data to one exchange
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    /// Caps the number of bars returned
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the newest bucket time to include
    pub fn with_to_ts(mut self, to_ts: i64) -> Self {
        self.to_ts = Some(to_ts);
        self
    }
}

/// Filters for the latest news endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsQuery {
    pub feeds: Option<String>,
    pub before: Option<Before>,
    pub lang: Option<String>,
}

impl NewsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts news to one or more feeds (`"coindesk"`, `["coindesk", "cryptocompare"]`)
    pub fn with_feeds<T: SymbolList + ?Sized>(mut self, feeds: &T) -> Self {
        self.feeds = Some(join_list(feeds));
        self
    }

    /// Only returns news published before this time
    pub fn with_before(mut self, before: impl Into<Before>) -> Self {
        self.before = Some(before.into());
        self
    }

    /// Restricts news to one or more language codes
    pub fn with_lang<T: SymbolList + ?Sized>(mut self, lang: &T) -> Self {
        self.lang = Some(join_list(lang));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_path_segments() {
        assert_eq!(Period::Day.as_str(), "day");
        assert_eq!(Period::Hour.as_str(), "hour");
        assert_eq!(Period::Minute.to_string(), "minute");
        assert_eq!("HOUR".parse::<Period>(), Ok(Period::Hour));
        assert!("week".parse::<Period>().is_err());
    }

    #[test]
    fn test_historical_bar_deserializes_api_shape() {
        let bar: HistoricalBar = serde_json::from_value(serde_json::json!({
            "time": 1_500_000_000,
            "close": 2500.5,
            "high": 2510.0,
            "low": 2490.0,
            "open": 2495.0,
            "volumefrom": 12.5,
            "volumeto": 31_000.0
        }))
        .unwrap();

        assert_eq!(bar.time, 1_500_000_000);
        assert_eq!(bar.close, 2500.5);
        assert_eq!(bar.volume_from, Some(12.5));
    }

    #[test]
    fn test_coin_id_display() {
        assert_eq!(CoinId::from(1182_i64).to_string(), "1182");
        assert_eq!(CoinId::from("1182").to_string(), "1182");
    }

    #[test]
    fn test_news_query_builder_joins_lists() {
        let query = NewsQuery::new()
            .with_feeds(&["coindesk", "cryptocompare"])
            .with_lang("PT")
            .with_before(1_496_275_200_i64);

        assert_eq!(query.feeds.as_deref(), Some("coindesk,cryptocompare"));
        assert_eq!(query.lang.as_deref(), Some("PT"));
        assert_eq!(query.before, Some(Before::Epoch(1_496_275_200.0)));
    }
}
