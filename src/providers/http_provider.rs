use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::BalanceError;
use crate::models::address::AddressInfo;
use crate::traits::balance_source::BalanceSource;

const BALANCE_FALLBACK_ERROR: &str = "Failed to fetch balance";
const ADDRESS_INFO_FALLBACK_ERROR: &str = "Failed to fetch address info";

/// toncenter-style response envelope
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    ok: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiEnvelope {
    fn is_ok(&self) -> bool {
        self.ok.as_ref().is_some_and(is_truthy)
    }

    /// Turn a failed envelope into an API error, preferring the server's message
    fn into_error(self, fallback: &str) -> BalanceError {
        let message = self
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        BalanceError::Api(message)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Extract the nanoTON balance from a `getAddressBalance` body
pub fn parse_balance_body(body: &str) -> Result<String, BalanceError> {
    let mut envelope: ApiEnvelope = serde_json::from_str(body)?;
    if !envelope.is_ok() {
        return Err(envelope.into_error(BALANCE_FALLBACK_ERROR));
    }

    match envelope.result.take() {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(envelope.into_error(BALANCE_FALLBACK_ERROR)),
    }
}

/// Extract a typed result from a successful envelope
pub fn parse_result_body<T: DeserializeOwned>(body: &str, fallback: &str) -> Result<T, BalanceError> {
    let mut envelope: ApiEnvelope = serde_json::from_str(body)?;
    if !envelope.is_ok() {
        return Err(envelope.into_error(fallback));
    }

    match envelope.result.take() {
        Some(result) if is_truthy(&result) => Ok(serde_json::from_value(result)?),
        _ => Err(envelope.into_error(fallback)),
    }
}

/// HTTP data provider for toncenter-compatible JSON APIs
pub struct HttpBalanceProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpBalanceProvider {
    /// Create a new HTTP provider
    pub fn new(config: &ApiConfig) -> Result<Self, BalanceError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET `{endpoint}/{method}?address=...` and return the body of a 2xx response
    async fn get(&self, method: &str, address: &str) -> Result<String, BalanceError> {
        let url = format!("{}/{}", self.endpoint, method);
        debug!("GET {} address={}", url, address);

        let mut request = self.client.get(&url).query(&[("address", address)]);
        if let Some(key) = &self.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BalanceError::Http(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl BalanceSource for HttpBalanceProvider {
    async fn fetch_balance(&self, address: &str) -> Result<String, BalanceError> {
        let body = self.get("getAddressBalance", address).await?;
        parse_balance_body(&body)
    }

    async fn fetch_address_info(&self, address: &str) -> Result<AddressInfo, BalanceError> {
        let body = self.get("getAddressInformation", address).await?;
        parse_result_body(&body, ADDRESS_INFO_FALLBACK_ERROR)
    }
}
