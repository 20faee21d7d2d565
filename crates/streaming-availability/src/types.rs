//! Data types for Streaming Availability API requests and responses

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A show record as returned by the API.
///
/// Kept opaque: records are passed through to callers unmodified.
pub type Show = serde_json::Value;

/// Popularity window used to rank a catalog's shows
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Day,
    #[default]
    Week,
    PastWeek,
    Month,
    Year,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::Day,
        Timeframe::Week,
        Timeframe::PastWeek,
        Timeframe::Month,
        Timeframe::Year,
    ];

    /// Parse a request parameter, falling back to `Week` for empty or
    /// unrecognized values
    pub fn from_param(s: &str) -> Self {
        s.parse().unwrap_or(Timeframe::Week)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::PastWeek => "past_week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// The API's `order_by` value for this window.
    ///
    /// The API has no "previous week" ranking, so `PastWeek` uses the
    /// two-week window.
    pub fn order_by(&self) -> &'static str {
        match self {
            Self::Day => "popularity_1day",
            Self::Week => "popularity_1week",
            Self::PastWeek => "popularity_2week",
            Self::Month => "popularity_1month",
            Self::Year => "popularity_1year",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by the strict `FromStr` impl of [`Timeframe`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTimeframe(pub String);

impl fmt::Display for UnknownTimeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown timeframe: '{}'", self.0)
    }
}

impl std::error::Error for UnknownTimeframe {}

impl FromStr for Timeframe {
    type Err = UnknownTimeframe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "past_week" => Ok(Self::PastWeek),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(UnknownTimeframe(other.to_string())),
        }
    }
}

/// Response from `/shows/search/filters`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub shows: Vec<Show>,
    #[serde(default)]
    pub has_more: bool,
    pub next_cursor: Option<String>,
}
