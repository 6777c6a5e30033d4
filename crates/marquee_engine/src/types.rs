use std::fmt;

use crate::wire::{CreditsRecord, DetailRecord, ListingPage};

/// A fetch the engine should run. `generation` is echoed back on the matching event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    BrowsePage { generation: u64, page: u32 },
    SearchPage { generation: u64, query: String, page: u32 },
    Detail { generation: u64, id: u64 },
    Credits { generation: u64, id: u64 },
}

/// Completion of exactly one [`EngineCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    BrowsePage {
        generation: u64,
        page: u32,
        result: Result<ListingPage, FetchError>,
    },
    SearchPage {
        generation: u64,
        page: u32,
        result: Result<ListingPage, FetchError>,
    },
    Detail {
        generation: u64,
        id: u64,
        result: Result<DetailRecord, FetchError>,
    },
    Credits {
        generation: u64,
        id: u64,
        result: Result<CreditsRecord, FetchError>,
    },
}

/// Normalized failure of a fetch operation. `message` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Page 0 or id 0 reached the engine; nothing was sent.
    InvalidRequest,
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
}

impl FailureKind {
    /// Network, timeout and non-2xx failures, as opposed to bad payloads or bad input.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FailureKind::HttpStatus(_) | FailureKind::Timeout | FailureKind::Network
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
