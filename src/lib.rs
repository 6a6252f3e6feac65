pub mod core;
pub mod fapi;

pub use crate::core::config::ExchangeConfig;
pub use crate::core::errors::ExchangeError;
pub use crate::core::kernel::{ReqwestRest, RestClient};
pub use crate::fapi::{build_client, FapiClient};
