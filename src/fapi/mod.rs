// Core modules - one responsibility per file
pub mod endpoints; // closed set of REST paths
pub mod params; // ordered parameter lists + price normalization
pub mod signer; // HMAC-SHA256 request signing
pub mod types; // order/balance vocabulary

// Sub-clients organized by responsibility
pub mod account;
pub mod market_data;
pub mod trading;

// Re-export main types for easier importing
pub use account::{
    Account, AssetBalance, BalanceFormatter, EnrichedBalance, EnrichedBalances, PriceMap,
    StandardBalanceFormatter,
};
pub use endpoints::Endpoint;
pub use market_data::MarketData;
pub use params::{as_query, ParamValue, Params, PriceInput};
pub use signer::FapiSigner;
pub use trading::{
    build_order_params, OrderAck, OrderIntent, OrderWarning, Trading, RECV_WINDOW,
};
pub use types::{FapiBalance, LongShortRatioKind, OrderSide, OrderType};

use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
use std::sync::Arc;

/// USD-margined futures client that composes the per-domain sub-clients
pub struct FapiClient<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone + Send + Sync> FapiClient<R> {
    /// Create a client over an already-built transport
    pub fn new(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest),
            account: Account::new(&rest),
        }
    }
}

/// Create a futures client with REST support
pub fn build_client(config: ExchangeConfig) -> Result<FapiClient<ReqwestRest>, ExchangeError> {
    // Determine base URL
    let base_url = if config.testnet {
        "https://testnet.binancefuture.com".to_string()
    } else {
        config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://fapi.binance.com".to_string())
    };

    // Build REST client
    let rest_config = RestClientConfig::new(base_url, "fapi".to_string())
        .with_timeout(30)
        .with_max_retries(3);

    let mut rest_builder = RestClientBuilder::new(rest_config);

    // Add authentication if credentials are provided
    if config.has_credentials() {
        let signer = Arc::new(FapiSigner::new(
            config.api_key().to_string(),
            config.secret_key().to_string(),
        ));
        rest_builder = rest_builder.with_signer(signer);
    }

    let rest = rest_builder.build()?;

    Ok(FapiClient::new(rest))
}
