/// Implemented operations of the futures REST API.
///
/// Each variant resolves to a fixed path. Operations the venue exposes but
/// this client does not cover (transfers, deposit history, user data streams)
/// have no variant, so an unimplemented call cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Time,
    ExchangeInfo,
    Trades,
    HistoricalTrades,
    AggTrades,
    Depth,
    Klines,
    PremiumIndex,
    IndexInfo,
    FundingRate,
    AllForceOrders,
    OpenInterest,
    OpenInterestHist,
    TopLongShortAccountRatio,
    TopLongShortPositionRatio,
    GlobalLongShortAccountRatio,
    TakerLongShortRatio,
    TickerPrice,
    BookTicker,
    Ticker24h,
    Order,
    OrderTest,
    OpenOrders,
    AllOrders,
    Balance,
    PositionRisk,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Time => "/fapi/v1/time",
            Self::ExchangeInfo => "/fapi/v1/exchangeInfo",
            Self::Trades => "/fapi/v1/trades",
            Self::HistoricalTrades => "/fapi/v1/historicalTrades",
            Self::AggTrades => "/fapi/v1/aggTrades",
            Self::Depth => "/fapi/v1/depth",
            Self::Klines => "/fapi/v1/klines",
            Self::PremiumIndex => "/fapi/v1/premiumIndex",
            Self::IndexInfo => "/fapi/v1/indexInfo",
            Self::FundingRate => "/fapi/v1/fundingRate",
            Self::AllForceOrders => "/fapi/v1/allForceOrders",
            Self::OpenInterest => "/fapi/v1/openInterest",
            Self::OpenInterestHist => "/futures/data/openInterestHist",
            Self::TopLongShortAccountRatio => "/futures/data/topLongShortAccountRatio",
            Self::TopLongShortPositionRatio => "/futures/data/topLongShortPositionRatio",
            Self::GlobalLongShortAccountRatio => "/futures/data/globalLongShortAccountRatio",
            Self::TakerLongShortRatio => "/futures/data/takerlongshortRatio",
            Self::TickerPrice => "/fapi/v1/ticker/price",
            Self::BookTicker => "/fapi/v1/ticker/bookTicker",
            Self::Ticker24h => "/fapi/v1/ticker/24hr",
            Self::Order => "/fapi/v1/order",
            Self::OrderTest => "/fapi/v1/order/test",
            Self::OpenOrders => "/fapi/v1/openOrders",
            Self::AllOrders => "/fapi/v1/allOrders",
            Self::Balance => "/fapi/v2/balance",
            Self::PositionRisk => "/fapi/v2/positionRisk",
        }
    }
}
