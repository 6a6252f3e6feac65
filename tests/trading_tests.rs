use fapix::fapi::{
    OrderIntent, OrderSide, OrderType, OrderWarning, Params, PriceInput, Trading,
};
use fapix::ExchangeError;
use serde_json::json;

mod common;
use common::{pairs, MockRest, RecordedCall};

fn trading() -> (MockRest, Trading<MockRest>) {
    let rest = MockRest::new();
    let trading = Trading::new(&rest);
    (rest, trading)
}

fn limit_intent() -> OrderIntent {
    OrderIntent {
        side: OrderSide::Buy,
        symbol: "BTCUSDT".to_string(),
        quantity: Some(0.5),
        price: Some(PriceInput::Numeric(10_000.0)),
        order_type: OrderType::Limit,
        flags: Params::new(),
    }
}

fn value<'a>(call: &'a RecordedCall, key: &str) -> Option<&'a str> {
    call.params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod trading_tests {
    use super::*;

    #[tokio::test]
    async fn test_orders_post_to_the_live_endpoint() {
        let (rest, trading) = trading();

        trading.order(&limit_intent(), false).await.unwrap();

        let calls = rest.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].endpoint, "/fapi/v1/order");
        assert!(calls[0].authenticated, "order dispatch must be signed");
    }

    #[tokio::test]
    async fn test_test_orders_use_the_validation_endpoint() {
        let (rest, trading) = trading();

        trading.order(&limit_intent(), true).await.unwrap();

        let calls = rest.calls();
        assert_eq!(calls[0].endpoint, "/fapi/v1/order/test");
        assert_eq!(calls[0].method, "POST");
    }

    #[tokio::test]
    async fn test_limit_order_wire_shape() {
        let (rest, trading) = trading();

        trading.order(&limit_intent(), false).await.unwrap();

        let calls = rest.calls();
        assert_eq!(
            pairs(&calls[0]),
            vec![
                ("symbol", "BTCUSDT"),
                ("side", "BUY"),
                ("type", "LIMIT"),
                ("recvWindow", "60000"),
                ("quantity", "0.5"),
                ("price", "10000.00000000"),
                ("timeInForce", "GTC"),
            ]
        );
    }

    #[tokio::test]
    async fn test_take_profit_without_quantity_closes_the_position() {
        let (rest, trading) = trading();

        let ack = trading
            .take_profit(OrderSide::Sell, "BTCUSDT", 12_000.0, None, None, true)
            .await
            .unwrap();

        let calls = rest.calls();
        let call = &calls[0];
        assert_eq!(value(call, "type"), Some("TAKE_PROFIT_MARKET"));
        assert_eq!(value(call, "stopPrice"), Some("12000.00000000"));
        assert_eq!(value(call, "closePosition"), Some("true"));
        assert_eq!(value(call, "quantity"), None);
        assert_eq!(value(call, "reduceOnly"), None);
        assert_eq!(value(call, "price"), None, "market variant carries no price");
        assert!(ack.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_take_profit_with_quantity_reduces_the_position() {
        let (rest, trading) = trading();

        trading
            .take_profit(
                OrderSide::Sell,
                "BTCUSDT",
                12_000.0,
                Some(5.0),
                Some(PriceInput::from(11_900.0)),
                true,
            )
            .await
            .unwrap();

        let calls = rest.calls();
        let call = &calls[0];
        assert_eq!(value(call, "type"), Some("TAKE_PROFIT"));
        assert_eq!(value(call, "reduceOnly"), Some("true"));
        assert_eq!(value(call, "closePosition"), None);
        assert_eq!(value(call, "quantity"), Some("5"));
        assert_eq!(value(call, "price"), Some("11900.00000000"));
        assert_eq!(value(call, "timeInForce"), Some("GTC"));
    }

    #[tokio::test]
    async fn test_stop_loss_mirrors_the_close_or_reduce_rule() {
        let (rest, trading) = trading();

        trading
            .stop_loss(OrderSide::Sell, "ETHUSDT", 1_500.0, None, None, true)
            .await
            .unwrap();
        trading
            .stop_loss(OrderSide::Sell, "ETHUSDT", 1_500.0, Some(2.0), None, true)
            .await
            .unwrap();

        let calls = rest.calls();
        assert_eq!(value(&calls[0], "type"), Some("STOP_MARKET"));
        assert_eq!(value(&calls[0], "closePosition"), Some("true"));
        assert_eq!(value(&calls[1], "type"), Some("STOP_MARKET"));
        assert_eq!(value(&calls[1], "reduceOnly"), Some("true"));
        assert_eq!(value(&calls[1], "quantity"), Some("2"));
    }

    #[tokio::test]
    async fn test_stop_loss_with_limit_price_upgrades_the_type() {
        let (rest, trading) = trading();

        trading
            .stop_loss(
                OrderSide::Sell,
                "ETHUSDT",
                1_500.0,
                Some(2.0),
                Some(PriceInput::from(1_490.0)),
                true,
            )
            .await
            .unwrap();

        let calls = rest.calls();
        assert_eq!(value(&calls[0], "type"), Some("STOP"));
        assert_eq!(value(&calls[0], "price"), Some("1490.00000000"));
        assert_eq!(value(&calls[0], "timeInForce"), Some("GTC"));
    }

    #[tokio::test]
    async fn test_stop_entry_sets_no_position_flags() {
        let (rest, trading) = trading();

        trading
            .stop_entry(OrderSide::Buy, "BTCUSDT", 10_500.0, 0.25, None, true)
            .await
            .unwrap();

        let calls = rest.calls();
        let call = &calls[0];
        assert_eq!(value(call, "closePosition"), None);
        assert_eq!(value(call, "reduceOnly"), None);
        assert_eq!(value(call, "stopPrice"), Some("10500.00000000"));
        assert_eq!(value(call, "quantity"), Some("0.25"));
    }

    #[tokio::test]
    async fn test_stop_trade_sends_the_trigger_as_stop_price() {
        let (rest, trading) = trading();

        trading
            .stop_trade(OrderSide::Sell, "BTCUSDT", 9_000.0, 1.0, true, true)
            .await
            .unwrap();

        let calls = rest.calls();
        let call = &calls[0];
        assert_eq!(value(call, "type"), Some("STOP_MARKET"));
        assert_eq!(value(call, "stopPrice"), Some("9000.00000000"));
        assert_eq!(value(call, "reduceOnly"), Some("true"));
        assert_eq!(value(call, "price"), None);
        assert_eq!(value(call, "timeInForce"), None);
    }

    #[tokio::test]
    async fn test_market_entry_carries_neither_price_nor_tif() {
        let (rest, trading) = trading();

        trading
            .market_entry(OrderSide::Buy, "BTCUSDT", 0.1, true)
            .await
            .unwrap();

        let calls = rest.calls();
        let call = &calls[0];
        assert_eq!(value(call, "type"), Some("MARKET"));
        assert_eq!(value(call, "price"), None);
        assert_eq!(value(call, "timeInForce"), None);
        assert_eq!(value(call, "quantity"), Some("0.1"));
    }

    #[tokio::test]
    async fn test_ack_returns_the_exchange_response_and_warnings() {
        let (rest, trading) = trading();
        rest.push_reply(json!({"orderId": 4221, "status": "NEW"}));

        let intent = OrderIntent {
            quantity: None,
            order_type: OrderType::Market,
            price: None,
            ..limit_intent()
        };
        let ack = trading.order(&intent, false).await.unwrap();

        assert_eq!(ack.response, json!({"orderId": 4221, "status": "NEW"}));
        assert_eq!(ack.warnings, vec![OrderWarning::QuantityMissing]);
        assert_eq!(
            rest.calls().len(),
            1,
            "warnings must not block the dispatch"
        );
    }

    #[tokio::test]
    async fn test_open_orders_is_a_signed_get() {
        let (rest, trading) = trading();

        trading.open_orders(None).await.unwrap();
        trading.open_orders(Some("BTCUSDT")).await.unwrap();

        let calls = rest.calls();
        assert_eq!(calls[0].method, "GET");
        assert_eq!(calls[0].endpoint, "/fapi/v1/openOrders");
        assert!(calls[0].authenticated);
        assert!(calls[0].params.is_empty());
        assert_eq!(pairs(&calls[1]), vec![("symbol", "BTCUSDT")]);
    }

    #[tokio::test]
    async fn test_all_orders_passes_filters_through() {
        let (rest, trading) = trading();

        trading
            .all_orders("BTCUSDT", Some(99), Some(50), None, None)
            .await
            .unwrap();

        let calls = rest.calls();
        assert_eq!(calls[0].endpoint, "/fapi/v1/allOrders");
        assert!(calls[0].authenticated);
        assert_eq!(
            pairs(&calls[0]),
            vec![("symbol", "BTCUSDT"), ("orderId", "99"), ("limit", "50")]
        );
    }

    #[tokio::test]
    async fn test_cancel_order_requires_an_id() {
        let (rest, trading) = trading();

        let err = trading.cancel_order("BTCUSDT", None, None).await.unwrap_err();

        assert!(
            matches!(err, ExchangeError::InvalidParameters(_)),
            "unexpected error: {err}"
        );
        assert!(rest.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_order_sends_a_signed_delete() {
        let (rest, trading) = trading();

        trading
            .cancel_order("BTCUSDT", Some(12_345), None)
            .await
            .unwrap();
        trading
            .cancel_order("BTCUSDT", None, Some("my-order-1"))
            .await
            .unwrap();

        let calls = rest.calls();
        assert_eq!(calls[0].method, "DELETE");
        assert_eq!(calls[0].endpoint, "/fapi/v1/order");
        assert!(calls[0].authenticated);
        assert_eq!(
            pairs(&calls[0]),
            vec![("symbol", "BTCUSDT"), ("orderId", "12345")]
        );
        assert_eq!(
            pairs(&calls[1]),
            vec![("symbol", "BTCUSDT"), ("origClientOrderId", "my-order-1")]
        );
    }
}
