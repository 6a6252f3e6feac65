use async_trait::async_trait;
use fapix::{ExchangeError, RestClient};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One request as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub authenticated: bool,
}

#[derive(Default)]
struct Inner {
    calls: Vec<RecordedCall>,
    replies: VecDeque<Value>,
}

/// Transport double: records every request and plays back canned replies.
///
/// Replies are consumed in queue order; once the queue is empty every request
/// gets an empty JSON object.
#[derive(Clone, Default)]
pub struct MockRest {
    inner: Arc<Mutex<Inner>>,
}

impl MockRest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: Value) {
        self.inner.lock().unwrap().replies.push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn record(
        &self,
        method: &'static str,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Value {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall {
            method,
            endpoint: endpoint.to_string(),
            params: query_params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            authenticated,
        });
        inner.replies.pop_front().unwrap_or_else(|| json!({}))
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        Ok(self.record("GET", endpoint, query_params, authenticated))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        let value = self.record("GET", endpoint, query_params, authenticated);
        serde_json::from_value(value)
            .map_err(|e| ExchangeError::DeserializationError(e.to_string()))
    }

    async fn post(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        Ok(self.record("POST", endpoint, query_params, authenticated))
    }

    async fn delete(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        Ok(self.record("DELETE", endpoint, query_params, authenticated))
    }
}

/// Render recorded params as owned pairs for compact assertions.
pub fn pairs(call: &RecordedCall) -> Vec<(&str, &str)> {
    call.params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}
