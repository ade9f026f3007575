//! HTTP client for making requests to upstream providers

use super::{UpstreamBody, UpstreamError};
use crate::config::OutgoingSettings;
use anyhow::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Standard accept header for JSON requests
const ACCEPT_JSON: &str = "application/json,text/javascript,*/*;q=0.01";

/// HTTP client wrapper shared by every request
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(settings.user_agent.as_str())
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Timeout applied to each request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` with query parameters and parse the body as a JSON object
    pub async fn get_json(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<UpstreamBody, UpstreamError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .header("Accept", ACCEPT_JSON)
            .query(params)
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;

        let status = response.status();
        debug!(url = %response.url(), status = %status, "Received upstream response");

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let raw = response
            .bytes()
            .await
            .map_err(UpstreamError::from_reqwest)?;

        UpstreamBody::parse(raw.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_get_json_sends_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vod/"))
            .and(query_param("ac", "list"))
            .and(query_param("wd", "hello world"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"total":0}"#, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/vod/", server.uri());
        let body = client
            .get_json(&url, &[("ac", "list".to_string()), ("wd", "hello world".to_string())])
            .await
            .unwrap();

        assert_eq!(body.raw(), br#"{"total":0}"#);
    }

    #[tokio::test]
    async fn test_get_json_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client.get_json(&server.uri(), &[]).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status: 502 }));
    }

    #[tokio::test]
    async fn test_get_json_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{}", "application/json")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let settings = OutgoingSettings {
            request_timeout: 0.2,
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        let err = client.get_json(&server.uri(), &[]).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Timeout));
    }
}
