use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::fapi::endpoints::Endpoint;
use crate::fapi::types::LongShortRatioKind;
use serde_json::Value;
use tracing::instrument;

/// Read-only market data queries.
///
/// Every method issues a single GET and returns the decoded response
/// unchanged. Optional arguments are included only when provided and
/// non-zero; unset optionals are omitted from the query entirely, never sent
/// as zero or empty.
pub struct MarketData<R: RestClient> {
    rest: R,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self { rest: rest.clone() }
    }
}

impl<R: RestClient> MarketData<R> {
    /// Get recent market trades for a symbol
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn recent_trades(&self, symbol: &str) -> Result<Value, ExchangeError> {
        let params = [("symbol", symbol)];
        self.rest.get(Endpoint::Trades.path(), &params, false).await
    }

    /// Get older market trades for a symbol
    ///
    /// `from_trade_id` is included as `fromId` only when strictly positive;
    /// any non-positive value (callers conventionally pass `-1`) means
    /// "start from the most recent trades".
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn historical_trades(
        &self,
        symbol: &str,
        limit: u32,
        from_trade_id: i64,
    ) -> Result<Value, ExchangeError> {
        let limit_str = limit.to_string();
        let from_id_str = (from_trade_id > 0).then(|| from_trade_id.to_string());

        let mut params = vec![("symbol", symbol), ("limit", limit_str.as_str())];
        if let Some(ref from_id) = from_id_str {
            params.push(("fromId", from_id.as_str()));
        }

        self.rest
            .get(Endpoint::HistoricalTrades.path(), &params, false)
            .await
    }

    /// Get mark price and funding rate data for a symbol
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn mark_price(&self, symbol: &str) -> Result<Value, ExchangeError> {
        let params = [("symbol", symbol)];
        self.rest
            .get(Endpoint::PremiumIndex.path(), &params, false)
            .await
    }

    /// Get composite index information for a symbol
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn index_info(&self, symbol: &str) -> Result<Value, ExchangeError> {
        let params = [("symbol", symbol)];
        self.rest
            .get(Endpoint::IndexInfo.path(), &params, false)
            .await
    }

    /// Get funding rate history for a symbol
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn funding_rates(
        &self,
        symbol: &str,
        limit: Option<u32>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let limit_str = limit.filter(|l| *l > 0).map(|l| l.to_string());
        let start_time_str = start_time.filter(|t| *t != 0).map(|t| t.to_string());
        let end_time_str = end_time.filter(|t| *t != 0).map(|t| t.to_string());

        let mut params = vec![("symbol", symbol)];
        if let Some(ref limit) = limit_str {
            params.push(("limit", limit.as_str()));
        }
        if let Some(ref start_time) = start_time_str {
            params.push(("startTime", start_time.as_str()));
        }
        if let Some(ref end_time) = end_time_str {
            params.push(("endTime", end_time.as_str()));
        }

        self.rest
            .get(Endpoint::FundingRate.path(), &params, false)
            .await
    }

    /// Get liquidation orders for a symbol
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn liquidation_orders(
        &self,
        symbol: &str,
        limit: Option<u32>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let limit_str = limit.filter(|l| *l > 0).map(|l| l.to_string());
        let start_time_str = start_time.filter(|t| *t != 0).map(|t| t.to_string());
        let end_time_str = end_time.filter(|t| *t != 0).map(|t| t.to_string());

        let mut params = vec![("symbol", symbol)];
        if let Some(ref limit) = limit_str {
            params.push(("limit", limit.as_str()));
        }
        if let Some(ref start_time) = start_time_str {
            params.push(("startTime", start_time.as_str()));
        }
        if let Some(ref end_time) = end_time_str {
            params.push(("endTime", end_time.as_str()));
        }

        self.rest
            .get(Endpoint::AllForceOrders.path(), &params, false)
            .await
    }

    /// Get present open interest for a symbol
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn open_interest(&self, symbol: &str) -> Result<Value, ExchangeError> {
        let params = [("symbol", symbol)];
        self.rest
            .get(Endpoint::OpenInterest.path(), &params, false)
            .await
    }

    /// Get open interest statistics for a symbol over a period
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol, period = %period))]
    pub async fn open_interest_history(
        &self,
        symbol: &str,
        period: &str,
        limit: Option<u32>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let limit_str = limit.filter(|l| *l > 0).map(|l| l.to_string());
        let start_time_str = start_time.filter(|t| *t != 0).map(|t| t.to_string());
        let end_time_str = end_time.filter(|t| *t != 0).map(|t| t.to_string());

        let mut params = vec![("symbol", symbol), ("period", period)];
        if let Some(ref limit) = limit_str {
            params.push(("limit", limit.as_str()));
        }
        if let Some(ref start_time) = start_time_str {
            params.push(("startTime", start_time.as_str()));
        }
        if let Some(ref end_time) = end_time_str {
            params.push(("endTime", end_time.as_str()));
        }

        self.rest
            .get(Endpoint::OpenInterestHist.path(), &params, false)
            .await
    }

    /// Get long/short ratio statistics for a symbol
    ///
    /// `kind` selects the statistic: `accounts`, `positions`, `global` or
    /// `taker`, each hitting its own endpoint. Unknown selectors fail with
    /// `InvalidParameters` before any request is made.
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol, kind = %kind, period = %period))]
    pub async fn long_short_ratio(
        &self,
        kind: &str,
        symbol: &str,
        period: &str,
        limit: Option<u32>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let kind: LongShortRatioKind = kind.parse()?;

        let limit_str = limit.filter(|l| *l > 0).map(|l| l.to_string());
        let start_time_str = start_time.filter(|t| *t != 0).map(|t| t.to_string());
        let end_time_str = end_time.filter(|t| *t != 0).map(|t| t.to_string());

        let mut params = vec![("symbol", symbol), ("period", period)];
        if let Some(ref limit) = limit_str {
            params.push(("limit", limit.as_str()));
        }
        if let Some(ref start_time) = start_time_str {
            params.push(("startTime", start_time.as_str()));
        }
        if let Some(ref end_time) = end_time_str {
            params.push(("endTime", end_time.as_str()));
        }

        self.rest.get(kind.endpoint().path(), &params, false).await
    }

    /// Get the exchange server time
    #[instrument(skip(self), fields(exchange = "fapi"))]
    pub async fn server_time(&self) -> Result<Value, ExchangeError> {
        self.rest.get(Endpoint::Time.path(), &[], false).await
    }

    /// Get exchange trading rules and symbol information
    #[instrument(skip(self), fields(exchange = "fapi"))]
    pub async fn exchange_info(&self) -> Result<Value, ExchangeError> {
        self.rest
            .get(Endpoint::ExchangeInfo.path(), &[], false)
            .await
    }

    /// Get the latest price for a symbol, or for all symbols when `None`
    #[instrument(skip(self), fields(exchange = "fapi"))]
    pub async fn price_ticker(&self, symbol: Option<&str>) -> Result<Value, ExchangeError> {
        let mut params = Vec::new();
        if let Some(symbol) = symbol {
            params.push(("symbol", symbol));
        }
        self.rest
            .get(Endpoint::TickerPrice.path(), &params, false)
            .await
    }

    /// Get the best bid/ask for a symbol, or for all symbols when `None`
    #[instrument(skip(self), fields(exchange = "fapi"))]
    pub async fn book_ticker(&self, symbol: Option<&str>) -> Result<Value, ExchangeError> {
        let mut params = Vec::new();
        if let Some(symbol) = symbol {
            params.push(("symbol", symbol));
        }
        self.rest
            .get(Endpoint::BookTicker.path(), &params, false)
            .await
    }

    /// Get 24-hour rolling window statistics for a symbol, or all symbols when `None`
    #[instrument(skip(self), fields(exchange = "fapi"))]
    pub async fn ticker_24h(&self, symbol: Option<&str>) -> Result<Value, ExchangeError> {
        let mut params = Vec::new();
        if let Some(symbol) = symbol {
            params.push(("symbol", symbol));
        }
        self.rest
            .get(Endpoint::Ticker24h.path(), &params, false)
            .await
    }

    /// Get compressed aggregate trades for a symbol
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn agg_trades(
        &self,
        symbol: &str,
        from_id: Option<u64>,
        limit: Option<u32>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let from_id_str = from_id.filter(|id| *id > 0).map(|id| id.to_string());
        let limit_str = limit.filter(|l| *l > 0).map(|l| l.to_string());
        let start_time_str = start_time.filter(|t| *t != 0).map(|t| t.to_string());
        let end_time_str = end_time.filter(|t| *t != 0).map(|t| t.to_string());

        let mut params = vec![("symbol", symbol)];
        if let Some(ref from_id) = from_id_str {
            params.push(("fromId", from_id.as_str()));
        }
        if let Some(ref limit) = limit_str {
            params.push(("limit", limit.as_str()));
        }
        if let Some(ref start_time) = start_time_str {
            params.push(("startTime", start_time.as_str()));
        }
        if let Some(ref end_time) = end_time_str {
            params.push(("endTime", end_time.as_str()));
        }

        self.rest
            .get(Endpoint::AggTrades.path(), &params, false)
            .await
    }

    /// Get the order book for a symbol
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn depth(&self, symbol: &str, limit: Option<u32>) -> Result<Value, ExchangeError> {
        let limit_str = limit.filter(|l| *l > 0).map(|l| l.to_string());

        let mut params = vec![("symbol", symbol)];
        if let Some(ref limit) = limit_str {
            params.push(("limit", limit.as_str()));
        }

        self.rest.get(Endpoint::Depth.path(), &params, false).await
    }

    /// Get candlestick bars for a symbol
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol, interval = %interval))]
    pub async fn klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: Option<u32>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let limit_str = limit.filter(|l| *l > 0).map(|l| l.to_string());
        let start_time_str = start_time.filter(|t| *t != 0).map(|t| t.to_string());
        let end_time_str = end_time.filter(|t| *t != 0).map(|t| t.to_string());

        let mut params = vec![("symbol", symbol), ("interval", interval)];
        if let Some(ref limit) = limit_str {
            params.push(("limit", limit.as_str()));
        }
        if let Some(ref start_time) = start_time_str {
            params.push(("startTime", start_time.as_str()));
        }
        if let Some(ref end_time) = end_time_str {
            params.push(("endTime", end_time.as_str()));
        }

        self.rest.get(Endpoint::Klines.path(), &params, false).await
    }
}
