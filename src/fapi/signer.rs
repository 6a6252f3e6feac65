use crate::core::errors::ExchangeError;
use crate::core::kernel::{SignatureResult, Signer};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 request signer for the futures API.
///
/// Signs `query_string&timestamp=...` and emits the API key header. The
/// returned parameter list carries the original query pairs followed by
/// `timestamp` and `signature`, in signing order.
pub struct FapiSigner {
    api_key: String,
    secret_key: String,
}

impl FapiSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key,
        }
    }

    fn generate_signature(&self, query_string: &str) -> Result<String, ExchangeError> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| ExchangeError::AuthError(format!("Failed to create HMAC: {}", e)))?;
        mac.update(query_string.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Signer for FapiSigner {
    fn sign_request(
        &self,
        _method: &str,
        _endpoint: &str,
        query_string: &str,
        timestamp: u64,
    ) -> SignatureResult {
        let full_query = if query_string.is_empty() {
            format!("timestamp={}", timestamp)
        } else {
            format!("{}&timestamp={}", query_string, timestamp)
        };

        let signature = self.generate_signature(&full_query)?;

        let mut headers = HashMap::new();
        headers.insert("X-MBX-APIKEY".to_string(), self.api_key.clone());

        // Parse back to individual params; the signature must cover exactly
        // what goes on the wire, so the original pairs ride along.
        let mut signed_params: Vec<(String, String)> = full_query
            .split('&')
            .filter_map(|param| {
                param
                    .split_once('=')
                    .map(|(k, v)| (k.to_string(), v.to_string()))
            })
            .collect();
        signed_params.push(("signature".to_string(), signature));

        Ok((headers, signed_params))
    }
}
