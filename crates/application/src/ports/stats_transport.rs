use async_trait::async_trait;
use bindstats_domain::TransportError;
use serde::de::DeserializeOwned;

/// A statistics document that can be decoded from the XML body served at
/// [`XmlDocument::PATH`].
///
/// Unknown elements and attributes must be tolerated and missing ones must
/// fall back to empty values, so implementors are expected to use
/// `#[serde(default)]` throughout.
pub trait XmlDocument: DeserializeOwned + Send + 'static {
    /// Path of the document relative to the statistics channel base URL.
    const PATH: &'static str;
}

/// Application-layer port for fetching statistics documents.
///
/// The implementation lives in the infrastructure layer. One call is one GET:
/// no retries, the body is decoded as it streams in.
#[async_trait]
pub trait StatsTransport: Send + Sync {
    /// Fetch `path` (relative to the configured base URL) and decode the body.
    ///
    /// Errors are classified by [`TransportError`]; the response body is
    /// released on every exit path.
    async fn get<D: XmlDocument>(&self, path: &str) -> Result<D, TransportError>;
}
