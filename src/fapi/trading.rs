use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::fapi::endpoints::Endpoint;
use crate::fapi::params::{as_query, ParamValue, Params, PriceInput};
use crate::fapi::types::{OrderSide, OrderType};
use serde_json::Value;
use std::fmt;
use tracing::{instrument, warn};

/// Default `recvWindow` sent with every order; overridable through flags.
pub const RECV_WINDOW: i64 = 60_000;

/// A single order to be shaped and dispatched.
///
/// Constructed, normalized into one request and discarded; nothing here is
/// persisted. `flags` may carry `stopPrice`, `reduceOnly`, `closePosition`
/// or any other venue field, and wins over the base fields on collision.
#[derive(Debug, Clone)]
pub struct OrderIntent {
    pub side: OrderSide,
    pub symbol: String,
    pub quantity: Option<f64>,
    pub price: Option<PriceInput>,
    pub order_type: OrderType,
    pub flags: Params,
}

/// Soft validation finding raised while shaping an order request.
///
/// Warnings never block dispatch; the exchange is the final arbiter. They
/// are returned in the [`OrderAck`] and logged through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderWarning {
    /// No positive quantity supplied and `closePosition` is not set.
    QuantityMissing,
    /// A quantity was supplied although `closePosition` is set.
    QuantityWithClosePosition,
    /// A price-carrying order type was dispatched without a price; the
    /// canonical zero price was sent in its place.
    PriceMissing,
}

impl fmt::Display for OrderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuantityMissing => {
                f.write_str("order has no positive quantity and closePosition is not set")
            }
            Self::QuantityWithClosePosition => {
                f.write_str("quantity is not needed when closePosition is set")
            }
            Self::PriceMissing => {
                f.write_str("no price supplied for a price-carrying order type")
            }
        }
    }
}

/// Exchange acknowledgement plus the validation findings for one dispatch.
#[derive(Debug, Clone)]
pub struct OrderAck {
    /// Decoded exchange response, unchanged.
    pub response: Value,
    /// Diagnostics raised while shaping the request.
    pub warnings: Vec<OrderWarning>,
}

/// Shape an order intent into its final parameter set.
///
/// Pure: no I/O, no clock. The resulting set is what goes on the wire, in
/// order: base fields, merged flags, quantity, then the injected price and
/// time-in-force for price-carrying types.
pub fn build_order_params(intent: &OrderIntent) -> (Params, Vec<OrderWarning>) {
    let mut warnings = Vec::new();

    let mut params = Params::new();
    params.set("symbol", intent.symbol.as_str());
    params.set("side", intent.side.as_str());
    params.set("type", intent.order_type.as_str());
    params.set("recvWindow", RECV_WINDOW);
    params.merge(&intent.flags);

    // A numeric stop price gets the canonical fixed-point form; textual stop
    // prices are trusted as given, absent stays absent.
    let stop_norm = match params.get("stopPrice") {
        Some(ParamValue::Num(v)) => Some(PriceInput::Numeric(*v).normalize()),
        Some(ParamValue::Int(v)) => Some(format!("{}.00000000", v)),
        _ => None,
    };
    if let Some(stop) = stop_norm {
        params.set("stopPrice", stop);
    }

    // An explicit closePosition=false is no different from leaving it out.
    match params.get("closePosition").and_then(ParamValue::as_bool) {
        None | Some(false) => {
            if !intent.quantity.map_or(false, |q| q > 0.0) {
                warnings.push(OrderWarning::QuantityMissing);
            }
        }
        Some(true) => {
            if intent.quantity.map_or(false, |q| q > 0.0) {
                warnings.push(OrderWarning::QuantityWithClosePosition);
            }
        }
    }

    if let Some(quantity) = intent.quantity {
        params.set("quantity", quantity);
    }

    if intent.order_type.carries_price() {
        let price = match &intent.price {
            Some(price) => price.normalize(),
            None => {
                warnings.push(OrderWarning::PriceMissing);
                "0.00000000".to_string()
            }
        };
        params.set("price", price);
        params.set("timeInForce", "GTC");
    }

    (params, warnings)
}

/// Order placement and management.
pub struct Trading<R: RestClient> {
    rest: R,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &R) -> Self {
        Self { rest: rest.clone() }
    }
}

impl<R: RestClient> Trading<R> {
    /// Place (or validate) an order.
    ///
    /// With `test` the request goes to the order-validation endpoint, which
    /// checks the parameters without hitting the matching engine; the live
    /// endpoint is a different path, not a flag.
    #[instrument(skip(self, intent), fields(exchange = "fapi", symbol = %intent.symbol, order_type = %intent.order_type, side = %intent.side, test = test))]
    pub async fn order(&self, intent: &OrderIntent, test: bool) -> Result<OrderAck, ExchangeError> {
        let (params, warnings) = build_order_params(intent);
        for warning in &warnings {
            warn!(%warning, symbol = %intent.symbol, "order validation");
        }

        let endpoint = if test {
            Endpoint::OrderTest
        } else {
            Endpoint::Order
        };

        let wire = params.to_wire();
        let response = self.rest.post(endpoint.path(), &as_query(&wire), true).await?;

        Ok(OrderAck { response, warnings })
    }

    /// Take-profit against an open position.
    ///
    /// Closes the whole position (`closePosition`) when no quantity is given,
    /// otherwise reduces it by the quantity (`reduceOnly`). A limit price
    /// upgrades the type from TAKE_PROFIT_MARKET to TAKE_PROFIT.
    pub async fn take_profit(
        &self,
        side: OrderSide,
        symbol: &str,
        trigger_price: impl Into<PriceInput>,
        quantity: Option<f64>,
        limit_price: Option<PriceInput>,
        test: bool,
    ) -> Result<OrderAck, ExchangeError> {
        let mut flags = Params::new();
        flags.set("stopPrice", trigger_price.into().normalize());
        if quantity.is_none() {
            flags.set("closePosition", true);
        } else {
            flags.set("reduceOnly", true);
        }

        let order_type = if limit_price.is_some() {
            OrderType::TakeProfit
        } else {
            OrderType::TakeProfitMarket
        };

        let intent = OrderIntent {
            side,
            symbol: symbol.to_string(),
            quantity,
            price: limit_price,
            order_type,
            flags,
        };
        self.order(&intent, test).await
    }

    /// Stop-loss against an open position.
    ///
    /// Same close/reduce rule as [`Self::take_profit`]; a limit price
    /// upgrades the type from STOP_MARKET to STOP.
    pub async fn stop_loss(
        &self,
        side: OrderSide,
        symbol: &str,
        trigger_price: impl Into<PriceInput>,
        quantity: Option<f64>,
        limit_price: Option<PriceInput>,
        test: bool,
    ) -> Result<OrderAck, ExchangeError> {
        let mut flags = Params::new();
        flags.set("stopPrice", trigger_price.into().normalize());
        if quantity.is_none() {
            flags.set("closePosition", true);
        } else {
            flags.set("reduceOnly", true);
        }

        let order_type = if limit_price.is_some() {
            OrderType::Stop
        } else {
            OrderType::StopMarket
        };

        let intent = OrderIntent {
            side,
            symbol: symbol.to_string(),
            quantity,
            price: limit_price,
            order_type,
            flags,
        };
        self.order(&intent, test).await
    }

    /// Stop-entry into a new position once the trigger price is reached.
    ///
    /// Neither `closePosition` nor `reduceOnly` is set; the quantity is
    /// required because this opens exposure.
    pub async fn stop_entry(
        &self,
        side: OrderSide,
        symbol: &str,
        trigger_price: impl Into<PriceInput>,
        quantity: f64,
        limit_price: Option<PriceInput>,
        test: bool,
    ) -> Result<OrderAck, ExchangeError> {
        let mut flags = Params::new();
        flags.set("stopPrice", trigger_price.into().normalize());

        let order_type = if limit_price.is_some() {
            OrderType::Stop
        } else {
            OrderType::StopMarket
        };

        let intent = OrderIntent {
            side,
            symbol: symbol.to_string(),
            quantity: Some(quantity),
            price: limit_price,
            order_type,
            flags,
        };
        self.order(&intent, test).await
    }

    /// Limit-entry into a new position.
    pub async fn limit_entry(
        &self,
        side: OrderSide,
        symbol: &str,
        limit_price: impl Into<PriceInput>,
        quantity: f64,
        test: bool,
    ) -> Result<OrderAck, ExchangeError> {
        let intent = OrderIntent {
            side,
            symbol: symbol.to_string(),
            quantity: Some(quantity),
            price: Some(limit_price.into()),
            order_type: OrderType::Limit,
            flags: Params::new(),
        };
        self.order(&intent, test).await
    }

    /// Market-entry into a new position.
    pub async fn market_entry(
        &self,
        side: OrderSide,
        symbol: &str,
        quantity: f64,
        test: bool,
    ) -> Result<OrderAck, ExchangeError> {
        let intent = OrderIntent {
            side,
            symbol: symbol.to_string(),
            quantity: Some(quantity),
            price: None,
            order_type: OrderType::Market,
            flags: Params::new(),
        };
        self.order(&intent, test).await
    }

    /// Stop-market order with the reduce-only flag passed through explicitly.
    ///
    /// The price argument is the trigger and travels as `stopPrice`.
    pub async fn stop_trade(
        &self,
        side: OrderSide,
        symbol: &str,
        price: impl Into<PriceInput>,
        quantity: f64,
        reduce_only: bool,
        test: bool,
    ) -> Result<OrderAck, ExchangeError> {
        let mut flags = Params::new();
        flags.set("stopPrice", price.into().normalize());
        flags.set("reduceOnly", reduce_only);

        let intent = OrderIntent {
            side,
            symbol: symbol.to_string(),
            quantity: Some(quantity),
            price: None,
            order_type: OrderType::StopMarket,
            flags,
        };
        self.order(&intent, test).await
    }

    /// Limit order with the reduce-only flag passed through explicitly.
    pub async fn limit_trade(
        &self,
        side: OrderSide,
        symbol: &str,
        price: impl Into<PriceInput>,
        quantity: f64,
        reduce_only: bool,
        test: bool,
    ) -> Result<OrderAck, ExchangeError> {
        let mut flags = Params::new();
        flags.set("reduceOnly", reduce_only);

        let intent = OrderIntent {
            side,
            symbol: symbol.to_string(),
            quantity: Some(quantity),
            price: Some(price.into()),
            order_type: OrderType::Limit,
            flags,
        };
        self.order(&intent, test).await
    }

    /// Market order with the reduce-only flag passed through explicitly.
    pub async fn market_trade(
        &self,
        side: OrderSide,
        symbol: &str,
        quantity: f64,
        reduce_only: bool,
        test: bool,
    ) -> Result<OrderAck, ExchangeError> {
        let mut flags = Params::new();
        flags.set("reduceOnly", reduce_only);

        let intent = OrderIntent {
            side,
            symbol: symbol.to_string(),
            quantity: Some(quantity),
            price: None,
            order_type: OrderType::Market,
            flags,
        };
        self.order(&intent, test).await
    }

    /// Get open orders, for one symbol or across all symbols
    #[instrument(skip(self), fields(exchange = "fapi"))]
    pub async fn open_orders(&self, symbol: Option<&str>) -> Result<Value, ExchangeError> {
        let mut params = Vec::new();
        if let Some(symbol) = symbol {
            params.push(("symbol", symbol));
        }
        self.rest
            .get(Endpoint::OpenOrders.path(), &params, true)
            .await
    }

    /// Get all orders for a symbol: active, canceled or filled
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn all_orders(
        &self,
        symbol: &str,
        order_id: Option<u64>,
        limit: Option<u32>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let order_id_str = order_id.map(|id| id.to_string());
        let limit_str = limit.filter(|l| *l > 0).map(|l| l.to_string());
        let start_time_str = start_time.filter(|t| *t != 0).map(|t| t.to_string());
        let end_time_str = end_time.filter(|t| *t != 0).map(|t| t.to_string());

        let mut params = vec![("symbol", symbol)];
        if let Some(ref order_id) = order_id_str {
            params.push(("orderId", order_id.as_str()));
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
            .get(Endpoint::AllOrders.path(), &params, true)
            .await
    }

    /// Cancel an active order by exchange id or client order id
    #[instrument(skip(self), fields(exchange = "fapi", symbol = %symbol))]
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: Option<u64>,
        orig_client_order_id: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        if order_id.is_none() && orig_client_order_id.is_none() {
            return Err(ExchangeError::InvalidParameters(
                "cancel_order requires an order id or an original client order id".to_string(),
            ));
        }

        let order_id_str = order_id.map(|id| id.to_string());
        let mut params = vec![("symbol", symbol)];
        if let Some(ref order_id) = order_id_str {
            params.push(("orderId", order_id.as_str()));
        }
        if let Some(client_id) = orig_client_order_id {
            params.push(("origClientOrderId", client_id));
        }

        self.rest.delete(Endpoint::Order.path(), &params, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::{build_order_params, OrderIntent, OrderWarning, Params, PriceInput};
    use crate::fapi::params::ParamValue;
    use crate::fapi::types::{OrderSide, OrderType};

    fn intent(order_type: OrderType) -> OrderIntent {
        OrderIntent {
            side: OrderSide::Buy,
            symbol: "BTCUSDT".to_string(),
            quantity: Some(0.5),
            price: Some(PriceInput::Numeric(10_000.0)),
            order_type,
            flags: Params::new(),
        }
    }

    #[test]
    fn limit_orders_carry_price_and_gtc() {
        let (params, warnings) = build_order_params(&intent(OrderType::Limit));

        assert_eq!(
            params.get("price").and_then(ParamValue::as_str),
            Some("10000.00000000")
        );
        assert_eq!(
            params.get("timeInForce").and_then(ParamValue::as_str),
            Some("GTC")
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn market_orders_carry_neither_price_nor_tif() {
        let (params, warnings) = build_order_params(&intent(OrderType::Market));

        assert!(!params.contains("price"));
        assert!(!params.contains("timeInForce"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn base_fields_precede_quantity_and_price() {
        let (params, _) = build_order_params(&intent(OrderType::Limit));
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(
            keys,
            vec!["symbol", "side", "type", "recvWindow", "quantity", "price", "timeInForce"]
        );
    }

    #[test]
    fn flags_override_recv_window_in_place() {
        let mut order = intent(OrderType::Limit);
        order.flags.set("recvWindow", 5000_i64);

        let (params, _) = build_order_params(&order);
        assert_eq!(params.get("recvWindow"), Some(&ParamValue::Int(5000)));

        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys[3], "recvWindow", "override must not move the field");
    }

    #[test]
    fn numeric_stop_price_is_normalized() {
        let mut order = intent(OrderType::StopMarket);
        order.flags.set("stopPrice", 9_500.5_f64);

        let (params, _) = build_order_params(&order);
        assert_eq!(
            params.get("stopPrice").and_then(ParamValue::as_str),
            Some("9500.50000000")
        );
    }

    #[test]
    fn textual_stop_price_passes_through() {
        let mut order = intent(OrderType::StopMarket);
        order.flags.set("stopPrice", "9500.5");

        let (params, _) = build_order_params(&order);
        assert_eq!(
            params.get("stopPrice").and_then(ParamValue::as_str),
            Some("9500.5")
        );
    }

    #[test]
    fn missing_quantity_warns_without_close_position() {
        let mut order = intent(OrderType::Market);
        order.quantity = None;

        let (params, warnings) = build_order_params(&order);
        assert_eq!(warnings, vec![OrderWarning::QuantityMissing]);
        assert!(!params.contains("quantity"));
    }

    #[test]
    fn quantity_with_close_position_warns_but_transmits() {
        let mut order = intent(OrderType::TakeProfitMarket);
        order.flags.set("closePosition", true);

        let (params, warnings) = build_order_params(&order);
        assert_eq!(warnings, vec![OrderWarning::QuantityWithClosePosition]);
        assert!(params.contains("quantity"), "explicit caller intent wins");
    }

    #[test]
    fn close_position_without_quantity_is_clean() {
        let mut order = intent(OrderType::TakeProfitMarket);
        order.quantity = None;
        order.flags.set("closePosition", true);

        let (_, warnings) = build_order_params(&order);
        assert!(warnings.is_empty());
    }

    #[test]
    fn false_close_position_still_warns_on_missing_quantity() {
        let mut order = intent(OrderType::Market);
        order.quantity = None;
        order.flags.set("closePosition", false);

        let (_, warnings) = build_order_params(&order);
        assert_eq!(warnings, vec![OrderWarning::QuantityMissing]);
    }

    #[test]
    fn zero_quantity_with_close_position_is_clean() {
        let mut order = intent(OrderType::TakeProfitMarket);
        order.quantity = Some(0.0);
        order.flags.set("closePosition", true);

        let (_, warnings) = build_order_params(&order);
        assert!(warnings.is_empty());
    }

    #[test]
    fn missing_price_on_limit_sends_canonical_zero() {
        let mut order = intent(OrderType::Limit);
        order.price = None;

        let (params, warnings) = build_order_params(&order);
        assert_eq!(
            params.get("price").and_then(ParamValue::as_str),
            Some("0.00000000")
        );
        assert!(warnings.contains(&OrderWarning::PriceMissing));
    }

    #[test]
    fn raw_price_passes_through_unformatted() {
        let mut order = intent(OrderType::Limit);
        order.price = Some(PriceInput::Raw("10000.5".to_string()));

        let (params, _) = build_order_params(&order);
        assert_eq!(
            params.get("price").and_then(ParamValue::as_str),
            Some("10000.5")
        );
    }
}
