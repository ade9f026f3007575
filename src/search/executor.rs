//! Relay execution: primary query, then at most one fallback

use super::models::{QueryAction, SearchRequest};
use super::summary::ResultSummary;
use crate::network::{HttpClient, UpstreamBody, UpstreamError};
use crate::providers::{Provider, ProviderRegistry, RouteId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Which stage produced the forwarded body
#[derive(Debug)]
pub enum RelayOutcome {
    /// The `ac=detail` query succeeded
    Primary(UpstreamBody),
    /// The `ac=detail` query failed and the `ac=list` retry succeeded
    Fallback {
        body: UpstreamBody,
        primary_error: UpstreamError,
    },
}

impl RelayOutcome {
    pub fn body(&self) -> &UpstreamBody {
        match self {
            RelayOutcome::Primary(body) => body,
            RelayOutcome::Fallback { body, .. } => body,
        }
    }

    pub fn into_body(self) -> UpstreamBody {
        match self {
            RelayOutcome::Primary(body) => body,
            RelayOutcome::Fallback { body, .. } => body,
        }
    }

    pub fn used_fallback(&self) -> bool {
        matches!(self, RelayOutcome::Fallback { .. })
    }
}

/// Upstream failures that survive the fallback
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("route {route} failed: primary: {primary}; fallback: {fallback}")]
    Exhausted {
        route: RouteId,
        primary: UpstreamError,
        fallback: UpstreamError,
    },
}

impl RelayError {
    pub fn route(&self) -> RouteId {
        match self {
            RelayError::Exhausted { route, .. } => *route,
        }
    }

    /// Message safe to show to the client
    pub fn user_message(&self) -> String {
        let route = self.route();
        format!(
            "连接资源站超时，路线{}暂时不可用，请稍后重试或切换到路线{}",
            route,
            route.alternate()
        )
    }
}

/// Forwards validated searches to the provider selected by their route
pub struct Relay {
    client: HttpClient,
    registry: Arc<ProviderRegistry>,
}

impl Relay {
    pub fn new(client: HttpClient, registry: Arc<ProviderRegistry>) -> Self {
        Self { client, registry }
    }

    /// Run the primary query and, if it fails, exactly one fallback query
    pub async fn execute(&self, request: &SearchRequest) -> Result<RelayOutcome, RelayError> {
        let provider = self.registry.get(request.route);

        info!(
            term = %request.term,
            route = %request.route,
            provider = %provider.name,
            "Searching upstream"
        );

        let primary_error = match self.fetch(provider, request, QueryAction::Detail).await {
            Ok(body) => return Ok(RelayOutcome::Primary(body)),
            Err(e) => {
                warn!(route = %request.route, error = %e, "Primary search failed");
                e
            }
        };

        info!(route = %request.route, "Retrying with ac=list");

        match self.fetch(provider, request, QueryAction::List).await {
            Ok(body) => Ok(RelayOutcome::Fallback {
                body,
                primary_error,
            }),
            Err(fallback) => {
                error!(route = %request.route, error = %fallback, "Fallback search failed");
                Err(RelayError::Exhausted {
                    route: request.route,
                    primary: primary_error,
                    fallback,
                })
            }
        }
    }

    async fn fetch(
        &self,
        provider: &Provider,
        request: &SearchRequest,
        action: QueryAction,
    ) -> Result<UpstreamBody, UpstreamError> {
        let params = action.params(&request.term);
        let body = self.client.get_json(&provider.base_url, &params).await?;

        let summary = ResultSummary::from_json(body.json());
        info!(
            route = %request.route,
            action = action.as_str(),
            total = ?summary.total,
            count = summary.count,
            first_title = ?summary.first_title,
            has_play_url = summary.has_play_url(),
            "Search results"
        );
        debug!(
            play_from = ?summary.first_play_from,
            play_url_len = ?summary.first_play_url_len,
            fields = %summary.first_fields.join(", "),
            "First result"
        );

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutgoingSettings, ProviderConfig, Settings};
    use std::time::Duration;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn relay_for(server: &MockServer, timeout: f64) -> Relay {
        let mut settings = Settings::default();
        settings.providers.push(ProviderConfig {
            id: 1,
            name: None,
            base_url: format!("{}/api.php/provide/vod/", server.uri()),
        });
        let outgoing = OutgoingSettings {
            request_timeout: timeout,
            ..Default::default()
        };
        let client = HttpClient::with_settings(&outgoing).unwrap();
        Relay::new(client, Arc::new(ProviderRegistry::from_settings(&settings)))
    }

    fn request(term: &str) -> SearchRequest {
        SearchRequest::parse(Some(term), Some("1")).unwrap()
    }

    #[tokio::test]
    async fn test_primary_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("ac", "detail"))
            .and(query_param("pg", "1"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"total":1,"list":[]}"#, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = relay_for(&server, 10.0).execute(&request("test")).await.unwrap();
        assert!(!outcome.used_fallback());
        assert_eq!(outcome.body().raw(), br#"{"total":1,"list":[]}"#);
    }

    #[tokio::test]
    async fn test_fallback_after_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("ac", "detail"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{}", "application/json")
                    .set_delay(Duration::from_secs(2)),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("ac", "list"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"total":2}"#, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = relay_for(&server, 0.3).execute(&request("test")).await.unwrap();
        match outcome {
            RelayOutcome::Fallback {
                body,
                primary_error,
            } => {
                assert!(matches!(primary_error, UpstreamError::Timeout));
                assert_eq!(body.raw(), br#"{"total":2}"#);
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_primary_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("ac", "detail"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("ac", "list"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"list":[]}"#, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = relay_for(&server, 10.0).execute(&request("test")).await.unwrap();
        assert!(outcome.used_fallback());
        assert_eq!(outcome.into_body().into_raw(), br#"{"list":[]}"#.to_vec());
    }

    #[tokio::test]
    async fn test_both_stages_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let err = relay_for(&server, 10.0).execute(&request("test")).await.unwrap_err();
        let RelayError::Exhausted {
            route,
            primary,
            fallback,
        } = &err;
        assert_eq!(route.get(), 1);
        assert!(matches!(primary, UpstreamError::Status { status: 503 }));
        assert!(matches!(fallback, UpstreamError::Status { status: 503 }));

        let message = err.user_message();
        assert!(message.contains("路线1"));
        assert!(message.contains("路线2"));
    }

    #[test]
    fn test_user_message_suggests_other_route() {
        let err = RelayError::Exhausted {
            route: RouteId::try_from(3).unwrap(),
            primary: UpstreamError::Timeout,
            fallback: UpstreamError::Status { status: 500 },
        };
        let message = err.user_message();
        assert!(message.contains("路线3"));
        assert!(message.contains("切换到路线1"));
    }
}
