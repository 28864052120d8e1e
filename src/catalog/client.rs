//! Card API client
//!
//! Performs the HTTP GET for a listing URL and hands back the parsed JSON
//! body. Success means a 2xx status or exactly 404; everything else is a
//! failure carrying the raw response. Interpreting the body is left to the
//! controller.

use futures::future::BoxFuture;
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;

/// Failure while fetching a listing page
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// No response was obtained (DNS, connect, reset, body read)
    Network(String),
    /// A response came back with a failing status
    Http { status: u16, body: String },
    /// The body was not JSON, or not the expected listing shape
    Malformed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Http { status, body } => {
                if body.is_empty() {
                    write!(f, "HTTP {}", status)
                } else {
                    write!(f, "HTTP {}: {}", status, body)
                }
            }
            Self::Malformed(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Source of listing pages
///
/// Implementations must not retry and must not interpret the body beyond
/// parsing it as JSON.
pub trait CardApi: Send + Sync {
    fn get_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>>;
}

/// `reqwest`-backed card API client
pub struct HttpCardApi {
    client: reqwest::Client,
}

impl HttpCardApi {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("deckview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(url, status = status.as_u16(), "Card API responded");

        if !is_resolved(status) {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

impl CardApi for HttpCardApi {
    fn get_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
        Box::pin(self.fetch(url))
    }
}

/// 2xx and 404 both resolve; 404 bodies are success-shaped
fn is_resolved(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::NOT_FOUND
}
