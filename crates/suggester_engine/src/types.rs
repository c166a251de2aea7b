use std::fmt;

use serde::Deserialize;

pub type RequestId = u64;

/// One `[name, confidence, popularity]` triple as sent by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestionRecord(pub String, pub f64, pub f64);

impl SuggestionRecord {
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn confidence(&self) -> f64 {
        self.1
    }

    pub fn popularity(&self) -> f64 {
        self.2
    }
}

/// Body of a lookup response. Success and failure share one object and are
/// told apart by whether `data` is present.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub data: Option<Vec<SuggestionRecord>>,
    #[serde(default)]
    pub message: Option<String>,
    /// Sent by the service but carries no meaning for the client.
    #[serde(default)]
    pub success: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupReply {
    Suggestions(Vec<SuggestionRecord>),
    Rejected { message: Option<String> },
}

impl LookupResponse {
    pub fn into_reply(self) -> LookupReply {
        match self.data {
            Some(records) => LookupReply::Suggestions(records),
            None => LookupReply::Rejected {
                message: self.message,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    LookupCompleted {
        request_id: RequestId,
        result: Result<LookupReply, LookupError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct LookupError {
    pub kind: FailureKind,
    pub message: String,
}

impl LookupError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidIdentifier,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidIdentifier => write!(f, "identifier not addressable"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
