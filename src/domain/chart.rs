//! Price series and asset history.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// A single `(timestamp, value)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Historical market chart for one asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub prices: Vec<PricePoint>,
    pub market_caps: Vec<PricePoint>,
    pub total_volumes: Vec<PricePoint>,
}

impl ChartSeries {
    /// Most recent price sample, if any.
    #[must_use]
    pub fn latest_price(&self) -> Option<PricePoint> {
        self.prices.last().copied()
    }

    /// Percent change from the first to the last price sample.
    #[must_use]
    pub fn change_percent(&self) -> Option<f64> {
        let first = self.prices.first()?;
        let last = self.prices.last()?;
        if first.value == 0.0 {
            return None;
        }
        Some((last.value - first.value) / first.value * 100.0)
    }
}

/// Time span of a chart request: a number of days, or the full history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSpan {
    Days(u32),
    Max,
}

impl fmt::Display for ChartSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days}"),
            Self::Max => f.write_str("max"),
        }
    }
}

impl Serialize for ChartSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for ChartSpan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            return Ok(Self::Max);
        }
        match s.parse::<u32>() {
            Ok(0) => Err("chart span must be at least one day".into()),
            Ok(days) => Ok(Self::Days(days)),
            Err(_) => Err(format!("'{s}' is not a number of days or 'max'")),
        }
    }
}

/// Sampling interval for asset history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HistoryInterval {
    M1,
    M5,
    M15,
    M30,
    H1,
    H2,
    H6,
    H12,
    #[default]
    D1,
}

impl HistoryInterval {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "m1",
            Self::M5 => "m5",
            Self::M15 => "m15",
            Self::M30 => "m30",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H6 => "h6",
            Self::H12 => "h12",
            Self::D1 => "d1",
        }
    }
}

impl fmt::Display for HistoryInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let interval = match s.trim().to_ascii_lowercase().as_str() {
            "m1" => Self::M1,
            "m5" => Self::M5,
            "m15" => Self::M15,
            "m30" => Self::M30,
            "h1" => Self::H1,
            "h2" => Self::H2,
            "h6" => Self::H6,
            "h12" => Self::H12,
            "d1" => Self::D1,
            other => return Err(format!("unknown history interval '{other}'")),
        };
        Ok(interval)
    }
}

/// One point of an asset's price history in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub time: DateTime<Utc>,
    pub price_usd: f64,
}
