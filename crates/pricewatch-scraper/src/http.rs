//! HTTP capability used by the source fetcher.
//!
//! The fetcher only needs "GET this URL with these headers within this
//! deadline". [`HttpConnect`] hands out one [`HttpFetch`] session per query so
//! the sources of a query share a connection pool that is dropped with it.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::FetchError;

/// Status and decoded body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One query's HTTP session.
pub trait HttpFetch {
    /// Issue a single GET. Non-2xx statuses are returned as responses, not errors.
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send;
}

/// Factory for per-query [`HttpFetch`] sessions.
pub trait HttpConnect {
    type Session: HttpFetch;

    /// Open a session for one query.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the underlying client cannot be built.
    fn connect(&self) -> Result<Self::Session, FetchError>;
}

/// `reqwest`-backed connector. Each [`HttpConnect::connect`] builds a fresh
/// [`Client`].
#[derive(Debug, Clone)]
pub struct ReqwestConnector {
    connect_timeout: Duration,
}

impl ReqwestConnector {
    #[must_use]
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for ReqwestConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl HttpConnect for ReqwestConnector {
    type Session = ReqwestFetch;

    fn connect(&self) -> Result<ReqwestFetch, FetchError> {
        let client = Client::builder()
            .connect_timeout(self.connect_timeout)
            .build()?;
        Ok(ReqwestFetch { client })
    }
}

/// A live `reqwest` session.
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: Client,
}

impl HttpFetch for ReqwestFetch {
    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError> {
        let mut request = self.client.get(url).timeout(timeout);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| classify(e, timeout))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(e, timeout))?;

        Ok(HttpResponse { status, body })
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            timeout_ms: duration_ms(timeout),
        }
    } else {
        FetchError::Http(err)
    }
}

pub(crate) fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
