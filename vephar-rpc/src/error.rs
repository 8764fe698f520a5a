use serde::{Deserialize, Serialize};

/// Unified error type for all Vephar RPC operations.
///
/// Each variant carries the `endpoint` (request path) that produced it, plus
/// variant-specific context. All variants are serializable so a presentation
/// layer can forward them as structured data.
///
/// The transport never retries: every variant is reported to the caller as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "code")]
pub enum RpcError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// The server answered with a non-2xx status.
    HttpStatus {
        /// Endpoint that produced the error.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// `Error` text of the response envelope, if the body could be decoded.
        message: Option<String>,
    },

    /// The response body could not be decoded.
    ParseError {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// A JSON request body could not be serialized.
    SerializationError {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The response envelope carried a non-empty `Error` field.
    Remote {
        /// Endpoint that produced the error.
        endpoint: String,
        /// Error text reported by the server.
        message: String,
    },

    /// The envelope reported success but carried no `Data`.
    MissingData {
        /// Endpoint that produced the error.
        endpoint: String,
    },
}

impl RpcError {
    /// Whether the failure is expected behavior (server-side rejection, bad
    /// input) rather than a fault, used to pick the log level.
    ///
    /// `true` maps to `warn`, `false` to `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Remote { .. } => true,
            Self::HttpStatus { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Request path the error originated from.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self {
            Self::NetworkError { endpoint, .. }
            | Self::Timeout { endpoint, .. }
            | Self::HttpStatus { endpoint, .. }
            | Self::ParseError { endpoint, .. }
            | Self::SerializationError { endpoint, .. }
            | Self::Remote { endpoint, .. }
            | Self::MissingData { endpoint } => endpoint,
        }
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { endpoint, detail } => {
                write!(f, "[{endpoint}] Network error: {detail}")
            }
            Self::Timeout { endpoint, detail } => {
                write!(f, "[{endpoint}] Request timeout: {detail}")
            }
            Self::HttpStatus {
                endpoint,
                status,
                message,
            } => {
                if let Some(msg) = message {
                    write!(f, "[{endpoint}] HTTP {status}: {msg}")
                } else {
                    write!(f, "[{endpoint}] HTTP {status}")
                }
            }
            Self::ParseError { endpoint, detail } => {
                write!(f, "[{endpoint}] Parse error: {detail}")
            }
            Self::SerializationError { endpoint, detail } => {
                write!(f, "[{endpoint}] Serialization error: {detail}")
            }
            Self::Remote { endpoint, message } => {
                write!(f, "[{endpoint}] {message}")
            }
            Self::MissingData { endpoint } => {
                write!(f, "[{endpoint}] Response carried no data")
            }
        }
    }
}

impl std::error::Error for RpcError {}

/// Convenience type alias for `Result<T, RpcError>`.
pub type Result<T> = std::result::Result<T, RpcError>;
