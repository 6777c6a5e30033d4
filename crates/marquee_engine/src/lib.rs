//! Marquee engine: transport adapter, fetch operations and effect execution.
mod api;
mod engine;
mod transport;
mod types;
pub mod wire;

pub use api::{ApiPaths, BrowseFilters, ListingApi, DEFAULT_LANGUAGE, DEFAULT_SORT_BY};
pub use engine::EngineHandle;
pub use transport::{
    ApiSettings, QueryParams, QueryValue, ReqwestTransport, Transport, TransportError,
    TransportResponse, DEFAULT_BASE_URL,
};
pub use types::{EngineCommand, EngineEvent, FailureKind, FetchError};
