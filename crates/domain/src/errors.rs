use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse classification of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Misconfigured base URL or path; fatal until reconfigured.
    InvalidEndpoint,
    /// Connection failure or timeout; transient.
    Transport,
    /// Server reachable but answered with a non-200 status.
    UnexpectedStatus,
    /// Body did not match the expected XML structure.
    Decode,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Error querying {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("Unexpected status from {url}: {status} {reason}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Failed to decode XML response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: BoxError,
    },
}

impl TransportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::InvalidEndpoint { .. } => ErrorKind::InvalidEndpoint,
            TransportError::Transport { .. } => ErrorKind::Transport,
            TransportError::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            TransportError::Decode { .. } => ErrorKind::Decode,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            TransportError::InvalidEndpoint { url, .. }
            | TransportError::Transport { url, .. }
            | TransportError::UnexpectedStatus { url, .. }
            | TransportError::Decode { url, .. } => url,
        }
    }

    /// Whether a later poll has a reasonable chance of succeeding unchanged.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Transport { .. } => true,
            TransportError::UnexpectedStatus { status, .. } => *status >= 500,
            TransportError::InvalidEndpoint { .. } | TransportError::Decode { .. } => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Failed to fetch statistics document {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("Unknown statistic group: {0}")]
    UnknownGroup(String),
}

impl StatsError {
    pub fn fetch(path: impl Into<String>, source: TransportError) -> Self {
        StatsError::Fetch {
            path: path.into(),
            source,
        }
    }

    /// Transport classification, `None` for errors raised before any I/O.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            StatsError::Fetch { source, .. } => Some(source.kind()),
            StatsError::UnknownGroup(_) => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            StatsError::Fetch { source, .. } => source.is_retryable(),
            StatsError::UnknownGroup(_) => false,
        }
    }
}
