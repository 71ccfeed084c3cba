//! Dapr sidecar client
//!
//! Talks to the sidecar's HTTP API for service invocation and publishing.
//! Every transport-level failure collapses into [`CnsError::BadRequest`];
//! the details are only visible in debug logs.

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::Settings;
use crate::error::{CnsError, Result};

/// User agent string for cnsctl HTTP requests
const CNSCTL_USER_AGENT: &str = concat!("cnsctl/", env!("CARGO_PKG_VERSION"));

/// Body the CNS service answers every invocation with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvokeResponse {
    pub data: Value,
    pub error: Option<String>,
}

impl InvokeResponse {
    /// Decode a raw invocation body
    ///
    /// Bodies without a `data` or `error` member are treated as bare data.
    pub fn from_value(value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) if map.contains_key("data") || map.contains_key("error") => map,
            other => {
                return Self {
                    data: other,
                    error: None,
                };
            }
        };

        let error = match map.remove("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(message)) => Some(message),
            Some(other) => Some(other.to_string()),
        };
        Self {
            data: map.remove("data").unwrap_or(Value::Null),
            error,
        }
    }

    /// The payload, or the service-reported error
    pub fn into_data(self) -> Result<Value> {
        match self.error {
            Some(message) => Err(CnsError::Service(message)),
            None => Ok(self.data),
        }
    }
}

/// Client for the Dapr sidecar HTTP API
#[derive(Debug, Clone)]
pub struct DaprClient {
    http: reqwest::Client,
    base_url: String,
}

impl DaprClient {
    /// Create a client for the sidecar at `host:port`
    pub fn new(host: &str, port: u16) -> Result<Self> {
        Self::with_base_url(&format!("http://{}:{}", host, port))
    }

    /// Create a client for a sidecar at an explicit base URL
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(CNSCTL_USER_AGENT)
            .build()
            .map_err(|e| CnsError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from resolved settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.dapr_host, settings.dapr_port()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Invoke `method` on `app_id` through the sidecar and return the decoded body
    pub async fn invoke(
        &self,
        app_id: &str,
        path: &str,
        verb: Method,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!(
            "{}/v1.0/invoke/{}/method/{}",
            self.base_url,
            app_id,
            path.trim_start_matches('/')
        );
        debug!("Invoking {} {}", verb, url);

        let mut request = self.http.request(verb, &url);
        if let Some(body) = body {
            trace!("Request body: {}", body);
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            debug!("Invoke transport failure: {}", e);
            CnsError::BadRequest
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Invoke returned HTTP {}", status);
            return Err(CnsError::BadRequest);
        }

        let text = response.text().await.map_err(|e| {
            debug!("Failed to read invoke response: {}", e);
            CnsError::BadRequest
        })?;
        trace!("Response body: {}", text);

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            debug!("Invoke response is not JSON: {}", e);
            CnsError::BadRequest
        })
    }

    /// Invoke and unwrap the CNS `{data, error}` envelope
    pub async fn invoke_data(
        &self,
        app_id: &str,
        path: &str,
        verb: Method,
        body: Option<&Value>,
    ) -> Result<Value> {
        let value = self.invoke(app_id, path, verb, body).await?;
        InvokeResponse::from_value(value).into_data()
    }

    /// Publish `payload` on `topic` of the `pubsub` component
    ///
    /// Topic segments are encoded one by one; the sidecar route takes the
    /// rest of the path as the topic, so `/` stays literal.
    pub async fn publish(&self, pubsub: &str, topic: &str, payload: &Value) -> Result<()> {
        let topic = topic
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/");
        let url = format!(
            "{}/v1.0/publish/{}/{}",
            self.base_url,
            urlencoding::encode(pubsub),
            topic
        );
        debug!("Publishing to {}", url);
        trace!("Payload: {}", payload);

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                debug!("Publish transport failure: {}", e);
                CnsError::BadRequest
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Publish returned HTTP {}", status);
            return Err(CnsError::BadRequest);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invoke_response_data() {
        let response = InvokeResponse::from_value(json!({"data": {"title": "Testing"}}));
        assert_eq!(response.into_data(), Ok(json!({"title": "Testing"})));
    }

    #[test]
    fn test_invoke_response_error() {
        let response = InvokeResponse::from_value(json!({"error": "not found"}));
        assert_eq!(
            response.into_data(),
            Err(CnsError::Service("not found".to_string()))
        );
    }

    #[test]
    fn test_invoke_response_error_only_envelope() {
        let response = InvokeResponse::from_value(json!({"error": null}));
        assert_eq!(response.into_data(), Ok(Value::Null));
    }

    #[test]
    fn test_invoke_response_structured_error() {
        let response = InvokeResponse::from_value(json!({"error": {"code": 7}}));
        assert_eq!(
            response.into_data(),
            Err(CnsError::Service(r#"{"code":7}"#.to_string()))
        );
    }

    #[test]
    fn test_invoke_response_without_envelope() {
        let response = InvokeResponse::from_value(json!({"title": "x"}));
        assert_eq!(response.into_data(), Ok(json!({"title": "x"})));
    }

    #[test]
    fn test_invoke_response_bare_value() {
        let response = InvokeResponse::from_value(json!([1, 2]));
        assert_eq!(response.into_data(), Ok(json!([1, 2])));
    }

    #[test]
    fn test_base_url_from_settings() {
        let settings = Settings {
            dapr_host: "sidecar".to_string(),
            dapr_port: "3600".to_string(),
            ..Default::default()
        };
        let client = DaprClient::from_settings(&settings).unwrap();
        assert_eq!(client.base_url(), "http://sidecar:3600");
    }

    #[test]
    fn test_bad_port_is_config_error() {
        let settings = Settings {
            dapr_port: "http".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            DaprClient::from_settings(&settings),
            Err(CnsError::Config(_))
        ));
    }
}
