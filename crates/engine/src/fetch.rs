//! Icon fetch layer
//!
//! Network transport for group icons. `data:` URIs never reach a fetcher;
//! they are decoded locally by [`decode_data_uri`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mojibox_core::error::{Error, Result};

/// Retrieves the bytes behind an icon URL.
///
/// Timeouts and retries are the implementation's business; the icon cache
/// only records success or failure per group.
pub trait IconFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetcher for hosts without network access. Every fetch fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetcher;

impl IconFetcher for OfflineFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        Err(Error::Fetch(format!("network disabled, cannot fetch {}", url)))
    }
}

/// True for icons that must be fetched rather than shown as a glyph.
pub fn is_remote_icon(icon: &str) -> bool {
    let head: String = icon.chars().take(8).collect::<String>().to_ascii_lowercase();
    head.starts_with("http://") || head.starts_with("https://") || head.starts_with("data:")
}

/// Decode `data:[<mime>][;base64],<payload>`.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let rest = uri
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &uri[5..])
        .ok_or_else(|| Error::Fetch("not a data URI".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::Fetch("data URI without payload separator".into()))?;

    if meta
        .rsplit(';')
        .next()
        .map_or(false, |p| p.eq_ignore_ascii_case("base64"))
    {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| Error::Fetch(format!("invalid base64 in data URI: {}", e)))
    } else {
        Ok(urlencoding::decode_binary(payload.as_bytes()).into_owned())
    }
}

/// Blocking HTTP fetcher.
#[cfg(feature = "http")]
pub struct HttpIconFetcher {
    agent: ureq::Agent,
    max_bytes: u64,
}

#[cfg(feature = "http")]
impl HttpIconFetcher {
    /// Fetcher with the given request timeout and body size cap.
    pub fn new(timeout: std::time::Duration, max_bytes: u64) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            max_bytes,
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpIconFetcher {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(10), 2 * 1024 * 1024)
    }
}

#[cfg(feature = "http")]
impl IconFetcher for HttpIconFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        use std::io::Read;

        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| Error::Fetch(format!("GET {} failed: {}", url, e)))?;
        let mut body = Vec::new();
        response
            .into_reader()
            .take(self.max_bytes)
            .read_to_end(&mut body)?;
        Ok(body)
    }
}
