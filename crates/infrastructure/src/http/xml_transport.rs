use async_trait::async_trait;
use bindstats_application::ports::{StatsTransport, XmlDocument};
use bindstats_domain::{BoxError, ClientConfig, TransportError};
use futures::{StreamExt, TryStreamExt};
use reqwest::{StatusCode, Url};
use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::io::{StreamReader, SyncIoBridge};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::endpoint::resolve_endpoint;

/// Statistics channel transport over HTTP(S).
///
/// Each `get` is a single GET whose body is decoded while it streams in, on a
/// blocking thread fed through [`SyncIoBridge`]. The configured timeout covers
/// the whole exchange, body included.
pub struct HttpXmlTransport {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpXmlTransport {
    /// Builds a dedicated HTTP client from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let invalid = |reason: String| TransportError::InvalidEndpoint {
            url: config.base_url.clone(),
            reason,
        };

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(proxy) = &config.proxy {
            let proxy =
                reqwest::Proxy::all(proxy).map_err(|e| invalid(format!("invalid proxy: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| invalid(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(
            config.base_url.clone(),
            client,
            config.timeout(),
        ))
    }

    /// Uses a caller-configured client (TLS, auth headers, proxy, ...).
    pub fn with_client(
        base_url: impl Into<String>,
        client: reqwest::Client,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch<D: XmlDocument>(&self, url: Url) -> Result<D, TransportError> {
        let url_str = url.to_string();
        debug!(url = %url_str, "Sending statistics request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Transport {
                url: url_str.clone(),
                source: Box::new(e),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TransportError::UnexpectedStatus {
                url: url_str,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        debug!(
            url = %url_str,
            content_type = ?response.headers().get(reqwest::header::CONTENT_TYPE),
            "Decoding statistics response"
        );

        // Ends the body stream if this future is dropped mid-decode.
        let cancel = CancellationToken::new();
        let _guard = cancel.clone().drop_guard();

        let body = Box::pin(
            response
                .bytes_stream()
                .map_err(std::io::Error::other)
                .take_until(cancel.cancelled_owned()),
        );
        let reader = SyncIoBridge::new(StreamReader::new(body));

        let decoded = tokio::task::spawn_blocking(move || {
            quick_xml::de::from_reader::<_, D>(BufReader::new(reader))
        })
        .await
        .map_err(|e| TransportError::Transport {
            url: url_str.clone(),
            source: Box::new(e),
        })?;

        decoded.map_err(|e| {
            if caused_by_io(&e) {
                TransportError::Transport {
                    url: url_str,
                    source: Box::new(e),
                }
            } else {
                TransportError::Decode {
                    url: url_str,
                    source: Box::new(e),
                }
            }
        })
    }
}

#[async_trait]
impl StatsTransport for HttpXmlTransport {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get<D: XmlDocument>(&self, path: &str) -> Result<D, TransportError> {
        let url = resolve_endpoint(&self.base_url, path)?;
        let url_str = url.to_string();

        match tokio::time::timeout(self.timeout, self.fetch::<D>(url)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Transport {
                url: url_str,
                source: BoxError::from(format!("request timed out after {:?}", self.timeout)),
            }),
        }
    }
}

/// Whether a decode failure came from reading the body rather than from the
/// document itself.
fn caused_by_io(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<std::io::Error>()
            || e.is::<Arc<std::io::Error>>()
            || e.is::<reqwest::Error>()
        {
            return true;
        }
        current = e.source();
    }
    false
}
