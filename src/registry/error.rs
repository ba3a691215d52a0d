//! Error types for registry lookups.

use thiserror::Error;

/// Errors that can occur while searching the registry.
///
/// The display string is what ends up in `SearchState::error`, so every
/// variant reads as a complete sentence fragment on its own.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Configured base URL cannot be used to build a search URL
    #[error("Invalid registry URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Registry host could not be reached
    #[error("Network error: could not reach {host}")]
    Unreachable {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request failed after the connection was established
    #[error("Request to registry failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded total timeout
    #[error("Registry request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Registry returned a non-success response
    #[error("Registry responded with {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body is not a search result document
    #[error("Malformed registry response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// Failure reported by a lookup that does not talk HTTP, shown verbatim
    #[error("{0}")]
    Other(String),
}

impl RegistryError {
    /// Classify a reqwest failure.
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_connect() {
            let host = err
                .url()
                .and_then(|url| url.host_str().map(str::to_string))
                .unwrap_or_else(|| "registry".to_string());
            RegistryError::Unreachable { host, source: err }
        } else {
            RegistryError::Transport { source: err }
        }
    }

    /// Short machine-readable kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::InvalidUrl { .. } => "invalid_url",
            RegistryError::Unreachable { .. } => "unreachable",
            RegistryError::Transport { .. } => "transport",
            RegistryError::Timeout { .. } => "timeout",
            RegistryError::Status { .. } => "status",
            RegistryError::Decode { .. } => "decode",
            RegistryError::Other(_) => "other",
        }
    }
}
