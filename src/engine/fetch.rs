//! Neighbor fetch adapter: per-worker HTTP handle that turns a node id into a raw payload.
//!
//! Transport errors never reach the traversal. [`NeighborFetcher::fetch`] logs them and hands back
//! the neutral payload `{}`, which decodes to zero neighbors.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;

use crate::Opts;
use crate::utils::config::HttpConsts;

/// Why a single request did not produce a payload.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}

impl FetchError {
    /// Worth another attempt: transport errors, 5xx and 429. Other statuses (e.g. 404) are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Client(_) => false,
            FetchError::Transport(_) => true,
            FetchError::Status(status) => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
        }
    }
}

/// Connection handle owned by exactly one worker for its lifetime.
pub trait NeighborFetcher {
    /// Raw neighbor payload for `node`, or the neutral payload on transport failure.
    fn fetch(&mut self, node: &str) -> Vec<u8>;
}

/// Shared factory that hands each worker its own [`NeighborFetcher`].
pub trait NeighborService: Sync {
    type Fetcher: NeighborFetcher;

    /// Open a handle for one worker. An error means that worker cannot expand anything.
    fn connect(&self) -> Result<Self::Fetcher, FetchError>;
}

impl<S: NeighborService> NeighborService for &S {
    type Fetcher = S::Fetcher;

    fn connect(&self) -> Result<Self::Fetcher, FetchError> {
        (**self).connect()
    }
}

/// Neighbor service reached over HTTP: `GET <service_url>/<percent-encoded node>`.
#[derive(Clone, Debug)]
pub struct HttpNeighborService {
    base: Url,
    timeout: Duration,
    retries: u32,
    user_agent: String,
}

impl HttpNeighborService {
    /// Validate the service URL from `opts`. Fails before any traversal starts.
    pub fn new(opts: &Opts) -> Result<Self> {
        let base = Url::parse(&opts.service_url)
            .with_context(|| format!("invalid service URL {:?}", opts.service_url))?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("service URL must be http or https: {}", base);
        }
        if base.cannot_be_a_base() {
            anyhow::bail!("service URL cannot take a path: {}", base);
        }
        Ok(Self {
            base,
            timeout: opts.timeout,
            retries: opts.retries,
            user_agent: opts.user_agent.clone(),
        })
    }

    /// URL for `node`: the id becomes one percent-encoded path segment under the base path.
    /// `None` for ids that cannot be a path segment (see [`is_dot_segment`]).
    pub fn url_for(&self, node: &str) -> Option<Url> {
        node_url(&self.base, node)
    }
}

/// `.` and `..` are resolved away by URL parsing, even percent-encoded, so a request for them
/// would hit the base path or its parent instead of the node.
pub fn is_dot_segment(node: &str) -> bool {
    matches!(node, "." | "..")
}

fn node_url(base: &Url, node: &str) -> Option<Url> {
    if is_dot_segment(node) {
        return None;
    }
    let mut url = base.clone();
    url.path_segments_mut().ok()?.pop_if_empty().push(node);
    Some(url)
}

impl NeighborService for HttpNeighborService {
    type Fetcher = HttpFetcher;

    fn connect(&self) -> Result<HttpFetcher, FetchError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .redirect(Policy::limited(10))
            .gzip(true)
            .build()
            .map_err(FetchError::Client)?;
        Ok(HttpFetcher {
            client,
            base: self.base.clone(),
            retries: self.retries,
        })
    }
}

/// Per-worker HTTP handle. Dropped (and its connections closed) when the worker finishes.
pub struct HttpFetcher {
    client: Client,
    base: Url,
    retries: u32,
}

impl HttpFetcher {
    fn try_fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(FetchError::Transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = resp.bytes().map_err(FetchError::Transport)?;
        Ok(body.to_vec())
    }
}

impl NeighborFetcher for HttpFetcher {
    fn fetch(&mut self, node: &str) -> Vec<u8> {
        let Some(url) = node_url(&self.base, node) else {
            warn!("Node {:?} cannot be addressed as a URL path segment", node);
            return HttpConsts::NEUTRAL_PAYLOAD.to_vec();
        };
        debug!("Sending request to: {}", url);

        let mut last_err = None;
        for attempt in 0..=self.retries {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                debug!(
                    "Retry {}/{} for {} after {:?}",
                    attempt, self.retries, node, delay
                );
                std::thread::sleep(delay);
            }
            match self.try_fetch(&url) {
                Ok(body) => {
                    debug!("Response received for {}: {} bytes", node, body.len());
                    return body;
                }
                Err(e) => {
                    let retryable = e.is_retryable();
                    last_err = Some(e);
                    if !retryable {
                        break;
                    }
                }
            }
        }

        if let Some(e) = last_err {
            warn!("Fetch failed for {}: {}", node, e);
        }
        HttpConsts::NEUTRAL_PAYLOAD.to_vec()
    }
}

/// Delay before retry `attempt` (1-based): initial backoff doubled each attempt, capped.
pub fn backoff_delay(attempt: u32) -> Duration {
    let shift = attempt.saturating_sub(1).min(16);
    HttpConsts::INITIAL_BACKOFF
        .saturating_mul(1 << shift)
        .min(HttpConsts::MAX_BACKOFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(url: &str) -> Result<HttpNeighborService> {
        HttpNeighborService::new(&Opts {
            service_url: url.to_string(),
            ..Opts::default()
        })
    }

    #[test]
    fn url_appends_encoded_segment() {
        let s = service("http://example.org/neighbors/").unwrap();
        assert_eq!(
            s.url_for("Kevin Bacon").unwrap().as_str(),
            "http://example.org/neighbors/Kevin%20Bacon"
        );
    }

    #[test]
    fn url_without_trailing_slash() {
        let s = service("http://example.org/neighbors").unwrap();
        assert_eq!(
            s.url_for("A").unwrap().as_str(),
            "http://example.org/neighbors/A"
        );
    }

    #[test]
    fn slash_in_node_stays_one_segment() {
        let s = service("http://example.org/n/").unwrap();
        assert_eq!(
            s.url_for("a/b").unwrap().as_str(),
            "http://example.org/n/a%2Fb"
        );
    }

    #[test]
    fn dot_ids_have_no_url() {
        let s = service("http://example.org/neighbors/").unwrap();
        assert!(s.url_for(".").is_none());
        assert!(s.url_for("..").is_none());
        assert_eq!(
            s.url_for("...").unwrap().as_str(),
            "http://example.org/neighbors/..."
        );
        assert_eq!(
            s.url_for("a.b").unwrap().as_str(),
            "http://example.org/neighbors/a.b"
        );
    }

    #[test]
    fn only_transient_statuses_retry() {
        use reqwest::StatusCode;
        assert!(FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR).is_retryable());
        assert!(FetchError::Status(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(FetchError::Status(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!FetchError::Status(StatusCode::NOT_FOUND).is_retryable());
        assert!(!FetchError::Status(StatusCode::BAD_REQUEST).is_retryable());
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(service("not a url").is_err());
        assert!(service("ftp://example.org/").is_err());
    }

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(backoff_delay(1), HttpConsts::INITIAL_BACKOFF);
        assert_eq!(backoff_delay(2), HttpConsts::INITIAL_BACKOFF * 2);
        assert_eq!(backoff_delay(30), HttpConsts::MAX_BACKOFF);
    }

    #[test]
    fn unreachable_host_yields_neutral_payload() {
        // Port 9 (discard) on localhost is closed in test environments; connection is refused quickly.
        let s = HttpNeighborService::new(&Opts {
            service_url: "http://127.0.0.1:9/neighbors/".to_string(),
            timeout: Duration::from_secs(2),
            ..Opts::default()
        })
        .unwrap();
        let mut f = s.connect().unwrap();
        assert_eq!(f.fetch("A"), HttpConsts::NEUTRAL_PAYLOAD);
    }
}
