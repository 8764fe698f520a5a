//! Generic HTTP transport
//!
//! One request per call: build the URL from a path and [`QueryParams`], attach
//! the body in the requested encoding, send, and hand back either decoded
//! JSON or an [`RpcError`]. Interpreting the envelope is left to the caller.
//!
//! # Body encodings
//! - **JSON** - `application/json`, used for structured requests
//! - **Raw** - caller-supplied content type, bytes passed through unaltered
//!   (text and binary uploads)

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, RpcError};
use crate::types::RpcResponse;
use crate::utils::log_sanitizer::{describe_bytes, preview_body};
use crate::utils::query::{QueryParams, build_url};

/// Content type of JSON request bodies.
pub const APPLICATION_JSON: &str = "application/json";
/// Content type of text uploads.
pub const TEXT_PLAIN: &str = "text/plain";

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Request body and the encoding it is sent with.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// Serialized as JSON with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Sent byte-for-byte with the given content type.
    Raw {
        bytes: Vec<u8>,
        content_type: String,
    },
}

impl RequestBody {
    /// JSON body from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> std::result::Result<Self, serde_json::Error> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Raw body with an explicit content type.
    pub fn raw(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self::Raw {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    /// `text/plain` body.
    pub fn text(text: impl Into<String>) -> Self {
        Self::raw(text.into().into_bytes(), TEXT_PLAIN)
    }
}

/// Timeouts applied by the underlying HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// JSON-over-HTTP transport bound to one server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` with its own HTTP client.
    pub fn new(base_url: impl Into<String>, settings: TransportSettings) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| RpcError::NetworkError {
                endpoint: base_url.clone(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a transport reusing an existing client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Server root every path is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` with encoded `params`.
    pub fn url_for(&self, path: &str, params: &QueryParams) -> String {
        format!("{}{}", self.base_url, build_url(path, params))
    }

    /// Build the request without sending it.
    pub fn build_request(
        &self,
        path: &str,
        params: &QueryParams,
        method: Method,
        body: RequestBody,
    ) -> Result<Request> {
        let url = self.url_for(path, params);
        let mut builder = self.client.request(method, &url);

        match body {
            RequestBody::None => {}
            RequestBody::Json(value) => {
                let bytes =
                    serde_json::to_vec(&value).map_err(|e| RpcError::SerializationError {
                        endpoint: path.to_string(),
                        detail: e.to_string(),
                    })?;
                builder = builder.header(CONTENT_TYPE, APPLICATION_JSON).body(bytes);
            }
            RequestBody::Raw {
                bytes,
                content_type,
            } => {
                log::debug!("[{path}] Request Body: {}", describe_bytes(&bytes, &content_type));
                builder = builder.header(CONTENT_TYPE, content_type).body(bytes);
            }
        }

        builder.build().map_err(|e| RpcError::NetworkError {
            endpoint: path.to_string(),
            detail: format!("Invalid request: {e}"),
        })
    }

    /// Send a prepared request and return the body of a 2xx response.
    ///
    /// Non-2xx responses become [`RpcError::HttpStatus`], keeping the
    /// envelope's `Error` text when the body decodes as one.
    pub async fn execute(&self, path: &str, request: Request) -> Result<Vec<u8>> {
        self.execute_accepting(path, request, &[]).await
    }

    /// [`execute`](Self::execute), additionally treating the `accepted`
    /// status codes as success.
    pub async fn execute_accepting(
        &self,
        path: &str,
        request: Request,
        accepted: &[u16],
    ) -> Result<Vec<u8>> {
        log::debug!("[{path}] {} {}", request.method(), request.url());

        let response = self.client.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                RpcError::Timeout {
                    endpoint: path.to_string(),
                    detail: e.to_string(),
                }
            } else {
                RpcError::NetworkError {
                    endpoint: path.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        log::debug!("[{path}] Response Status: {status}");

        let body = response
            .bytes()
            .await
            .map_err(|e| RpcError::NetworkError {
                endpoint: path.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?
            .to_vec();

        if !status.is_success() && !accepted.contains(&status.as_u16()) {
            let message = serde_json::from_slice::<RpcResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error);
            log::warn!("[{path}] Server answered HTTP {}", status.as_u16());
            return Err(RpcError::HttpStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    /// Perform one request and decode the JSON envelope.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
        method: Method,
        body: RequestBody,
    ) -> Result<RpcResponse<T>> {
        self.request_accepting(path, params, method, body, &[]).await
    }

    /// [`request`](Self::request) with extra status codes treated as success.
    pub async fn request_accepting<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
        method: Method,
        body: RequestBody,
        accepted: &[u16],
    ) -> Result<RpcResponse<T>> {
        let request = self.build_request(path, params, method, body)?;
        let bytes = self.execute_accepting(path, request, accepted).await?;
        parse_json(&bytes, path)
    }

    /// Perform one request and return the raw response body.
    pub async fn request_raw(
        &self,
        path: &str,
        params: &QueryParams,
        method: Method,
    ) -> Result<Vec<u8>> {
        let request = self.build_request(path, params, method, RequestBody::None)?;
        self.execute(path, request).await
    }
}

/// Decode a JSON response body.
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8], endpoint: &str) -> Result<T> {
    log::debug!("[{endpoint}] Response Body: {}", preview_body(bytes));

    serde_json::from_slice(bytes).map_err(|e| {
        log::error!("[{endpoint}] JSON parse failed: {e}");
        log::error!("[{endpoint}] Raw response: {}", preview_body(bytes));
        RpcError::ParseError {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        }
    })
}
