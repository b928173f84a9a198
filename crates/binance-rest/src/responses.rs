//! Typed bodies for the market-data endpoints.
//!
//! Decode with [`ApiResponse::json`](crate::ApiResponse::json).

use rust_decimal::Decimal;
use serde::Deserialize;

/// Response from GET /api/v3/time.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTimeResponse {
    #[serde(rename = "serverTime")]
    pub server_time: i64,
}

/// One `[price, quantity]` order book level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PriceLevel(
    #[serde(deserialize_with = "deserialize_decimal_from_str")] pub Decimal,
    #[serde(deserialize_with = "deserialize_decimal_from_str")] pub Decimal,
);

impl PriceLevel {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn quantity(&self) -> Decimal {
        self.1
    }
}

/// Response from GET /api/v3/depth.
#[derive(Debug, Clone, Deserialize)]
pub struct DepthResponse {
    #[serde(rename = "lastUpdateId")]
    pub last_update_id: u64,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

/// Response from GET /api/v3/avgPrice.
#[derive(Debug, Clone, Deserialize)]
pub struct AvgPriceResponse {
    /// Averaging window in minutes.
    pub mins: u32,
    #[serde(deserialize_with = "deserialize_decimal_from_str")]
    pub price: Decimal,
    #[serde(rename = "closeTime", default)]
    pub close_time: Option<i64>,
}

/// One entry from GET /api/v3/ticker/price.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceTicker {
    pub symbol: String,
    #[serde(deserialize_with = "deserialize_decimal_from_str")]
    pub price: Decimal,
}

/// One entry from GET /api/v3/ticker/bookTicker.
#[derive(Debug, Clone, Deserialize)]
pub struct BookTicker {
    pub symbol: String,
    #[serde(rename = "bidPrice", deserialize_with = "deserialize_decimal_from_str")]
    pub bid_price: Decimal,
    #[serde(rename = "bidQty", deserialize_with = "deserialize_decimal_from_str")]
    pub bid_qty: Decimal,
    #[serde(rename = "askPrice", deserialize_with = "deserialize_decimal_from_str")]
    pub ask_price: Decimal,
    #[serde(rename = "askQty", deserialize_with = "deserialize_decimal_from_str")]
    pub ask_qty: Decimal,
}

/// Deserialize a Decimal from a string.
fn deserialize_decimal_from_str<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<Decimal>().map_err(serde::de::Error::custom)
}
