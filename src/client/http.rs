//! HTTP client for the submission relay
//!
//! Posts the booking form as `application/x-www-form-urlencoded`, the same
//! way a browser would, and reads back the relay's one-word answer.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::traits::RelayClientTrait;
use crate::relay::{RelayOutcome, SubmissionPayload};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum RelayClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected reply {0:?}")]
    UnexpectedReply(String),
}

/// Client for posting booking requests to the relay
pub struct RelayClient {
    /// The HTTP client
    http: reqwest::Client,
    /// Full URL of the relay endpoint
    url: String,
}

impl RelayClient {
    /// Create a new relay client
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, RelayClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(concat!("booking-desk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RelayClientTrait for RelayClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<RelayOutcome, RelayClientError> {
        let response = self
            .http
            .post(&self.url)
            .form(payload)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        tracing::debug!(url = %self.url, reply = %body.trim(), "relay replied");
        RelayOutcome::parse(&body).ok_or(RelayClientError::UnexpectedReply(body))
    }

    fn endpoint(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{router, MockMailTransport, RelayState, TransportError, RELAY_PATH};
    use axum::routing::post;
    use axum::Router;
    use std::sync::Arc;

    /// Serve `app` on an ephemeral port and return its base URL
    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn relay_state(transport: MockMailTransport) -> RelayState {
        RelayState::new(
            "desk@example.com".parse().unwrap(),
            "booking-desk@example.com".parse().unwrap(),
            Arc::new(transport),
        )
    }

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "5551234".to_string(),
            date: "2026-11-02".to_string(),
            time: "10:30".to_string(),
            service: "Consultation".to_string(),
            message: "Hello & thanks".to_string(),
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_relay() {
        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .withf(|mail| {
                mail.reply_to.as_ref().map(|m| m.email.to_string())
                    == Some("ada@example.com".to_string())
                    && mail.body.contains("Hello &amp; thanks")
            })
            .times(1)
            .returning(|_| Ok(()));
        let base = spawn(router(relay_state(transport))).await;

        let client = RelayClient::new(format!("{base}{RELAY_PATH}"), None).unwrap();
        let outcome = client.submit(&payload()).await.unwrap();
        assert_eq!(outcome, RelayOutcome::Success);
    }

    #[tokio::test]
    async fn test_transport_error_is_an_outcome() {
        let mut transport = MockMailTransport::new();
        transport.expect_send().returning(|_| {
            let missing_from = lettre::Message::builder()
                .body(String::new())
                .unwrap_err();
            Err(TransportError::Build(missing_from))
        });
        let base = spawn(router(relay_state(transport))).await;

        let client = RelayClient::new(format!("{base}{RELAY_PATH}"), None).unwrap();
        let outcome = client.submit(&payload()).await.unwrap();
        assert_eq!(outcome, RelayOutcome::TransportError);
    }

    #[tokio::test]
    async fn test_unexpected_body_is_an_error() {
        let app = Router::new().route("/send_mail", post(|| async { "<html>oops</html>" }));
        let base = spawn(app).await;

        let client = RelayClient::new(format!("{base}/send_mail"), None).unwrap();
        let err = client.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, RelayClientError::UnexpectedReply(ref body) if body.contains("oops")));
    }

    #[tokio::test]
    async fn test_http_error_status_is_an_error() {
        let base = spawn(Router::new()).await;

        let client = RelayClient::new(format!("{base}/missing"), None).unwrap();
        let err = client.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, RelayClientError::Request(_)));
    }

    #[test]
    fn test_endpoint() {
        let client = RelayClient::new("http://127.0.0.1:8080/send_mail", None).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:8080/send_mail");
    }
}
