use crate::core::errors::ExchangeError;
use crate::fapi::endpoints::Endpoint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
    Stop,
    StopMarket,
    TakeProfit,
    TakeProfitMarket,
}

impl OrderType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::Stop => "STOP",
            Self::StopMarket => "STOP_MARKET",
            Self::TakeProfit => "TAKE_PROFIT",
            Self::TakeProfitMarket => "TAKE_PROFIT_MARKET",
        }
    }

    /// Whether the exchange expects a `price` field (and therefore a forced
    /// GTC time-in-force) on this order type. Market-style types never carry
    /// either.
    pub const fn carries_price(self) -> bool {
        matches!(self, Self::Limit | Self::Stop | Self::TakeProfit)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector for the long/short ratio statistics endpoints.
///
/// Each kind resolves to its own endpoint path; an unrecognized selector
/// string fails with `InvalidParameters` before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LongShortRatioKind {
    /// Top trader long/short ratio by accounts.
    Accounts,
    /// Top trader long/short ratio by positions.
    Positions,
    /// Global long/short ratio across all accounts.
    Global,
    /// Taker buy/sell volume ratio.
    Taker,
}

impl LongShortRatioKind {
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Accounts => Endpoint::TopLongShortAccountRatio,
            Self::Positions => Endpoint::TopLongShortPositionRatio,
            Self::Global => Endpoint::GlobalLongShortAccountRatio,
            Self::Taker => Endpoint::TakerLongShortRatio,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Positions => "positions",
            Self::Global => "global",
            Self::Taker => "taker",
        }
    }
}

impl FromStr for LongShortRatioKind {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accounts" => Ok(Self::Accounts),
            "positions" => Ok(Self::Positions),
            "global" => Ok(Self::Global),
            "taker" => Ok(Self::Taker),
            other => Err(ExchangeError::InvalidParameters(format!(
                "Unknown long/short ratio kind: '{}' (expected accounts, positions, global or taker)",
                other
            ))),
        }
    }
}

impl fmt::Display for LongShortRatioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw per-asset record from the account balance endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FapiBalance {
    pub asset: String,
    pub balance: Decimal,
    #[serde(rename = "availableBalance")]
    pub available_balance: Decimal,
}
