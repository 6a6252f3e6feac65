use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::fapi::endpoints::Endpoint;
use crate::fapi::types::FapiBalance;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::instrument;

/// Current prices by asset, used to value holdings in quote terms.
pub type PriceMap = HashMap<String, Decimal>;

/// Per-asset balance after projection from the raw account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBalance {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
}

/// Balance with an optional quote valuation attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedBalance {
    pub free: Decimal,
    pub locked: Decimal,
    /// Quote value of the whole holding when the price map knows the asset.
    pub value: Option<Decimal>,
}

/// Asset-keyed balance view.
pub type EnrichedBalances = BTreeMap<String, EnrichedBalance>;

/// Formats projected balances into the final client-facing view.
pub trait BalanceFormatter: Send + Sync {
    fn balance_data(
        &self,
        balances: Vec<AssetBalance>,
        price_data: Option<&PriceMap>,
    ) -> EnrichedBalances;
}

/// Default formatter: keys by asset and values holdings when prices are given.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBalanceFormatter;

impl BalanceFormatter for StandardBalanceFormatter {
    fn balance_data(
        &self,
        balances: Vec<AssetBalance>,
        price_data: Option<&PriceMap>,
    ) -> EnrichedBalances {
        balances
            .into_iter()
            .map(|balance| {
                let value = price_data
                    .and_then(|prices| prices.get(&balance.asset))
                    .map(|price| (balance.free + balance.locked) * *price);
                (
                    balance.asset,
                    EnrichedBalance {
                        free: balance.free,
                        locked: balance.locked,
                        value,
                    },
                )
            })
            .collect()
    }
}

fn project_balance(raw: FapiBalance) -> AssetBalance {
    // The exchange occasionally reports availableBalance a rounding step
    // above balance; locked never goes negative.
    let locked = (raw.balance - raw.available_balance).max(Decimal::ZERO);
    AssetBalance {
        asset: raw.asset,
        free: raw.available_balance,
        locked,
    }
}

/// Account state: balances and positions.
pub struct Account<R: RestClient, F = StandardBalanceFormatter> {
    rest: R,
    formatter: F,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: rest.clone(),
            formatter: StandardBalanceFormatter,
        }
    }
}

impl<R: RestClient + Clone, F: BalanceFormatter> Account<R, F> {
    /// Use a custom balance formatter.
    pub fn with_formatter(rest: &R, formatter: F) -> Self {
        Self {
            rest: rest.clone(),
            formatter,
        }
    }
}

impl<R: RestClient, F: BalanceFormatter> Account<R, F> {
    /// Fetch account balances, projected per asset.
    ///
    /// `free` is the available balance; `locked` is the clamped difference
    /// between total and available. Pass a price map to value each holding
    /// in quote terms; `None` skips enrichment.
    #[instrument(skip(self, price_data), fields(exchange = "fapi"))]
    pub async fn balances(
        &self,
        price_data: Option<&PriceMap>,
    ) -> Result<EnrichedBalances, ExchangeError> {
        let raw: Vec<FapiBalance> = self
            .rest
            .get_json(Endpoint::Balance.path(), &[], true)
            .await?;

        let balances = raw.into_iter().map(project_balance).collect();
        Ok(self.formatter.balance_data(balances, price_data))
    }

    /// Get position information, for one symbol or across all symbols
    #[instrument(skip(self), fields(exchange = "fapi"))]
    pub async fn position_risk(&self, symbol: Option<&str>) -> Result<Value, ExchangeError> {
        let mut params = Vec::new();
        if let Some(symbol) = symbol {
            params.push(("symbol", symbol));
        }
        self.rest
            .get(Endpoint::PositionRisk.path(), &params, true)
            .await
    }
}
