//! Network HTTP transport (reqwest)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{Transport, decode_response};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::request::PreparedRequest;

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for NetworkHttpClient {
    async fn send(&self, request: PreparedRequest) -> ClientResult<Value> {
        let url = format!("{}{}", self.base_url, request.path_and_query);
        let mut req = self
            .client
            .request(request.method, &url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        decode_response(status, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = NetworkHttpClient::new(&ClientConfig::new("http://localhost:8000/api/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(NetworkHttpClient::new(&ClientConfig::new("localhost")).is_err());
    }
}
