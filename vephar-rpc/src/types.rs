use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, RpcError};

// ============ Envelope ============

/// Response envelope shared by every JSON endpoint: `{"Data": ..., "Error": "..."}`.
///
/// The server always sends `Error`, using an empty string on success; both the
/// empty string and a missing field decode to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcResponse<T> {
    /// Error text reported by the server.
    #[serde(
        rename = "Error",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
    /// Payload, absent on failure.
    #[serde(rename = "Data")]
    pub data: Option<T>,
}

impl<T> RpcResponse<T> {
    /// Build a successful response.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            error: None,
            data: Some(data),
        }
    }

    /// Build a failed response.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            data: None,
        }
    }

    /// Whether the envelope reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Interpret the envelope: a present `error` becomes [`RpcError::Remote`],
    /// a success without data becomes [`RpcError::MissingData`].
    pub fn into_data(self, endpoint: &str) -> Result<T> {
        if let Some(message) = self.error {
            return Err(RpcError::Remote {
                endpoint: endpoint.to_string(),
                message,
            });
        }
        self.data.ok_or_else(|| RpcError::MissingData {
            endpoint: endpoint.to_string(),
        })
    }

    /// Like [`into_data`](Self::into_data) for writes, where the payload is
    /// irrelevant and may be absent.
    pub fn into_ack(self, endpoint: &str) -> Result<()> {
        match self.error {
            Some(message) => Err(RpcError::Remote {
                endpoint: endpoint.to_string(),
                message,
            }),
            None => Ok(()),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============ Key listing ============

/// Number of keys requested per listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    /// Every selectable page size, smallest first.
    pub const ALL: [Self; 4] = [Self::Ten, Self::TwentyFive, Self::Fifty, Self::Hundred];

    /// Numeric value sent on the wire.
    #[must_use]
    pub const fn get(self) -> u16 {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl TryFrom<u16> for PageSize {
    type Error = String;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        match value {
            10 => Ok(Self::Ten),
            25 => Ok(Self::TwentyFive),
            50 => Ok(Self::Fifty),
            100 => Ok(Self::Hundred),
            other => Err(format!("unsupported page size: {other}")),
        }
    }
}

impl From<PageSize> for u16 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// One page of a prefix listing, as returned by `/kv/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPage {
    /// Keys in server order.
    #[serde(rename = "Keys", default, deserialize_with = "null_as_default")]
    pub keys: Vec<String>,
    /// Continuation cursor; empty when there are no further pages.
    #[serde(rename = "NextKey", default)]
    pub next_key: String,
    /// Page size the server applied.
    #[serde(rename = "PageSize", default)]
    pub page_size: u16,
}

impl KeyPage {
    /// Whether another page can be requested.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.next_key.is_empty()
    }
}

// ============ Status ============

/// Point-in-time snapshot of the remote Raft node, as returned by `/raft/status`.
///
/// The server sends its stats map verbatim, so the record keeps every entry and
/// only offers typed views over the well-known ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusRecord(BTreeMap<String, serde_json::Value>);

impl StatusRecord {
    /// Raw value of a stat rendered as text; strings are returned unquoted.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    #[must_use]
    pub fn applied_index(&self) -> Option<u64> {
        self.get_u64("applied_index")
    }

    #[must_use]
    pub fn commit_index(&self) -> Option<u64> {
        self.get_u64("commit_index")
    }

    #[must_use]
    pub fn term(&self) -> Option<u64> {
        self.get_u64("term")
    }

    #[must_use]
    pub fn num_peers(&self) -> Option<u64> {
        self.get_u64("num_peers")
    }

    /// Raft role of the node (`Leader`, `Follower`, ...).
    #[must_use]
    pub fn state(&self) -> Option<String> {
        self.get("state")
    }

    /// Number of stats in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All stats in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StatusRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), serde_json::Value::String(v.into())))
                .collect(),
        )
    }
}

// ============ Uploads ============

/// Media type used when a file declares none.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// A file selected for upload: its bytes plus the media type it declares.
#[derive(Clone, PartialEq, Eq)]
pub struct FileBlob {
    /// Original file name, informational only.
    pub file_name: String,
    /// Declared media type; may be empty.
    pub media_type: String,
    /// File contents, uploaded unaltered.
    pub bytes: Vec<u8>,
}

impl FileBlob {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Content type to send with the upload.
    #[must_use]
    pub fn content_type(&self) -> &str {
        if self.media_type.trim().is_empty() {
            DEFAULT_MEDIA_TYPE
        } else {
            &self.media_type
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for FileBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileBlob")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
