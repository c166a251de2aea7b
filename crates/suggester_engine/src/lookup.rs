use std::time::Duration;

use futures_util::StreamExt;
use suggester_logging::{suggester_debug, suggester_trace};
use url::Url;

use crate::{FailureKind, LookupError, LookupResponse};

/// Path segments between the base URL and the identifier.
pub const LOOKUP_PATH: [&str; 2] = ["api", "suggestions"];

#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub base_url: String,
    /// `None` waits for as long as the OS allows.
    pub connect_timeout: Option<Duration>,
    /// `None` means a request may stay pending indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/".to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// `{base_url}/api/suggestions/{identifier}` with the identifier as one
/// percent-encoded path segment.
///
/// `.` and `..` are rejected: URL parsing resolves them as dot segments in
/// every spelling (including `%2E`), so no request path can carry them.
pub fn lookup_url(base_url: &str, identifier: &str) -> Result<Url, LookupError> {
    if matches!(identifier, "." | "..") {
        return Err(LookupError::new(
            FailureKind::InvalidIdentifier,
            format!("{identifier:?} cannot be sent as a path segment"),
        ));
    }
    let mut url = Url::parse(base_url)
        .map_err(|err| LookupError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| LookupError::new(FailureKind::InvalidUrl, "base url cannot carry a path"))?
        .pop_if_empty()
        .extend(LOOKUP_PATH)
        .push(identifier);
    Ok(url)
}

#[async_trait::async_trait]
pub trait LookupService: Send + Sync {
    async fn lookup(&self, identifier: &str) -> Result<LookupResponse, LookupError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestLookupService {
    settings: LookupSettings,
    client: reqwest::Client,
}

impl ReqwestLookupService {
    pub fn new(settings: LookupSettings) -> Result<Self, LookupError> {
        // Reject a bad base URL up front rather than on every lookup.
        lookup_url(&settings.base_url, "check")?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| LookupError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { settings, client })
    }

    fn too_large(&self, actual: u64) -> LookupError {
        LookupError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl LookupService for ReqwestLookupService {
    async fn lookup(&self, identifier: &str) -> Result<LookupResponse, LookupError> {
        let url = lookup_url(&self.settings.base_url, identifier)?;
        suggester_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }
        suggester_trace!("lookup body {} bytes", body.len());

        serde_json::from_slice(&body)
            .map_err(|err| LookupError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        return LookupError::new(FailureKind::Timeout, err.to_string());
    }
    LookupError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_becomes_last_path_segment() {
        let url = lookup_url("http://127.0.0.1:5000/", "alice").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/suggestions/alice");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let url = lookup_url("https://example.com/app/", "alice").unwrap();
        assert_eq!(url.as_str(), "https://example.com/app/api/suggestions/alice");

        let url = lookup_url("https://example.com/app", "alice").unwrap();
        assert_eq!(url.as_str(), "https://example.com/app/api/suggestions/alice");
    }

    #[test]
    fn identifier_is_percent_encoded() {
        let url = lookup_url("http://localhost/", "a b/c").unwrap();
        assert_eq!(url.as_str(), "http://localhost/api/suggestions/a%20b%2Fc");
    }

    #[test]
    fn dot_segments_are_rejected_instead_of_dropped() {
        for identifier in [".", ".."] {
            let err = lookup_url("http://localhost/", identifier).unwrap_err();
            assert_eq!(err.kind, FailureKind::InvalidIdentifier);
        }
        let url = lookup_url("http://localhost/", "...").unwrap();
        assert_eq!(url.as_str(), "http://localhost/api/suggestions/...");
        let url = lookup_url("http://localhost/", "a.b").unwrap();
        assert_eq!(url.as_str(), "http://localhost/api/suggestions/a.b");
    }

    #[test]
    fn unusable_base_url_is_rejected() {
        assert_eq!(
            lookup_url("not a url", "alice").unwrap_err().kind,
            FailureKind::InvalidUrl
        );
        assert_eq!(
            lookup_url("mailto:someone@example.com", "alice").unwrap_err().kind,
            FailureKind::InvalidUrl
        );
        assert!(ReqwestLookupService::new(LookupSettings {
            base_url: "not a url".into(),
            ..LookupSettings::default()
        })
        .is_err());
    }
}
