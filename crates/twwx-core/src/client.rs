//! Feed sources backed by the CWA open data file API and by saved documents.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::document::is_blank;
use crate::error::FetchError;
use crate::traits::FeedSource;

/// County and city forecast dataset (F-A0010-001).
pub const DEFAULT_FEED_URL: &str =
    "https://opendata.cwa.gov.tw/fileapi/v1/opendataapi/F-A0010-001";

/// Bounded wait for the whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("twwx/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client for the feed.
///
/// The API key is sent as the `Authorization` query parameter and is never
/// logged.
#[derive(Clone)]
pub struct FeedClient {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
}

impl std::fmt::Debug for FeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedClient")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl FeedClient {
    /// Create a client with the default timeout.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(url, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedSource for FeedClient {
    fn fetch(&self) -> Result<Value, FetchError> {
        info!("Fetching weather feed from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("Authorization", self.api_key.as_str()),
                ("downloadType", "WEB"),
                ("format", "JSON"),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        debug!("Received {} bytes", body.len());
        decode(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A feed document saved on disk, for offline runs and replays.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedSource for FileFeed {
    fn fetch(&self) -> Result<Value, FetchError> {
        info!("Reading weather feed from {}", self.path.display());
        let body = std::fs::read(&self.path).map_err(|source| FetchError::Read {
            path: self.path.clone(),
            source,
        })?;
        decode(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Decode a JSON body, tolerating a leading UTF-8 byte order mark.
fn decode(body: &[u8]) -> Result<Value, FetchError> {
    let body = body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(body);
    let doc: Value = serde_json::from_slice(body)?;
    if is_blank(&doc) {
        return Err(FetchError::Empty);
    }
    Ok(doc)
}
