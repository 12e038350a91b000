//! In-memory HTTP stand-ins for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pricewatch_core::{ExtractionRule, SelectorPair, Source};

use crate::error::FetchError;
use crate::http::{HttpConnect, HttpFetch, HttpResponse};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Page(u16, String),
    Hang,
    Refuse(String),
}

#[derive(Default)]
struct Inner {
    routes: Vec<(String, Reply)>,
    requested: Mutex<Vec<String>>,
    sessions: AtomicUsize,
}

/// Answers GETs by URL prefix. Unrouted URLs are refused.
#[derive(Clone, Default)]
pub(crate) struct StubHttp {
    inner: Arc<Inner>,
}

impl StubHttp {
    pub(crate) fn new(routes: Vec<(&str, Reply)>) -> Self {
        Self {
            inner: Arc::new(Inner {
                routes: routes
                    .into_iter()
                    .map(|(prefix, reply)| (prefix.to_owned(), reply))
                    .collect(),
                ..Inner::default()
            }),
        }
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.inner.requested.lock().unwrap().clone()
    }

    pub(crate) fn sessions(&self) -> usize {
        self.inner.sessions.load(Ordering::SeqCst)
    }
}

impl HttpFetch for StubHttp {
    async fn get(
        &self,
        url: &str,
        _headers: &[(String, String)],
        _timeout: Duration,
    ) -> Result<HttpResponse, FetchError> {
        self.inner.requested.lock().unwrap().push(url.to_owned());
        let reply = self
            .inner
            .routes
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Page(status, body)) => Ok(HttpResponse { status, body }),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(FetchError::Transport("hung request finished".to_owned()))
            }
            Some(Reply::Refuse(reason)) => Err(FetchError::Transport(reason)),
            None => Err(FetchError::Transport(format!("no route for {url}"))),
        }
    }
}

impl HttpConnect for StubHttp {
    type Session = StubHttp;

    fn connect(&self) -> Result<StubHttp, FetchError> {
        self.inner.sessions.fetch_add(1, Ordering::SeqCst);
        Ok(self.clone())
    }
}

/// A source at `https://{id}.test/search?q={query}` with a `.name`/`.price` rule.
pub(crate) fn source(id: &str, timeout: Duration) -> Source {
    Source {
        id: id.to_owned(),
        name: id.to_uppercase(),
        url_template: format!("https://{id}.test/search?q={{query}}"),
        headers: vec![("User-Agent".to_owned(), "pricewatch-test".to_owned())],
        rule: ExtractionRule {
            pairs: vec![SelectorPair {
                name: Some(".name".to_owned()),
                price: ".price".to_owned(),
            }],
            max_items: 3,
        },
        timeout,
    }
}

/// Listing page with one card per `(name, price)`.
pub(crate) fn listing(cards: &[(&str, &str)]) -> String {
    let body: String = cards
        .iter()
        .map(|(name, price)| {
            format!(r#"<div class="card"><h3 class="name">{name}</h3><span class="price">{price}</span></div>"#)
        })
        .collect();
    format!("<html><body>{body}</body></html>")
}
