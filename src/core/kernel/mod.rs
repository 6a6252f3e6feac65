/// Unified transport layer for the futures API
///
/// The kernel contains only transport logic and generic interfaces; nothing
/// in here knows about specific endpoints or order semantics.
///
/// # Architecture
///
/// ## Transport Layer
/// - `RestClient`: Unified HTTP client interface
/// - `ReqwestRest`: Production implementation over reqwest
///
/// ## Authentication
/// - `Signer`: Pluggable authentication interface, implemented by the venue
///   layer (HMAC-SHA256 for this exchange)
///
/// # Key Principles
///
/// 1. **Transport Only**: The kernel contains NO venue-specific logic
/// 2. **Pluggable**: All components are trait-based and configurable
/// 3. **Testable**: Dependency injection for easy testing
///
/// # Example
///
/// ```rust,no_run
/// use fapix::core::kernel::{RestClient, RestClientBuilder, RestClientConfig};
/// use fapix::fapi::FapiSigner;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RestClientConfig::new(
///     "https://fapi.binance.com".to_string(),
///     "fapi".to_string(),
/// );
/// let signer = Arc::new(FapiSigner::new(
///     "api_key".to_string(),
///     "secret_key".to_string(),
/// ));
/// let rest = RestClientBuilder::new(config).with_signer(signer).build()?;
///
/// let server_time = rest.get("/fapi/v1/time", &[], false).await?;
/// # Ok(())
/// # }
/// ```
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, Signer};
