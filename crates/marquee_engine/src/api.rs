use std::sync::Arc;

use marquee_logging::marquee_warn;
use serde::de::DeserializeOwned;

use crate::transport::{QueryParams, Transport, TransportError, TransportResponse};
use crate::wire::{CreditsRecord, DetailRecord, ListingPage};
use crate::{FailureKind, FetchError};

pub const DEFAULT_LANGUAGE: &str = "zh-CN";
pub const DEFAULT_SORT_BY: &str = "popularity.desc";

/// Endpoint paths, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPaths {
    pub browse: String,
    pub search: String,
    /// `{detail_prefix}/{id}` and `{detail_prefix}/{id}/credits`.
    pub detail_prefix: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            browse: "/movie/popular".to_string(),
            search: "/search/movie".to_string(),
            detail_prefix: "/movie".to_string(),
        }
    }
}

/// Filter passthroughs for the browse listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseFilters {
    pub sort_by: String,
    pub genre: Option<String>,
}

impl Default for BrowseFilters {
    fn default() -> Self {
        Self {
            sort_by: DEFAULT_SORT_BY.to_string(),
            genre: None,
        }
    }
}

/// The four fetch operations. Each call issues exactly one request and normalizes the outcome.
#[derive(Clone)]
pub struct ListingApi {
    transport: Arc<dyn Transport>,
    paths: ApiPaths,
    language: String,
    filters: BrowseFilters,
}

impl ListingApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            paths: ApiPaths::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            filters: BrowseFilters::default(),
        }
    }

    pub fn with_paths(mut self, paths: ApiPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_filters(mut self, filters: BrowseFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn browse_params(&self, page: u32) -> QueryParams {
        let params = QueryParams::new()
            .with("include_adult", false)
            .with("include_video", false)
            .with("language", self.language.as_str())
            .with("page", page)
            .with("sort_by", self.filters.sort_by.as_str());
        match self.filters.genre.as_deref() {
            Some(genre) => params.with("genre_id", genre),
            None => params,
        }
    }

    pub fn search_params(&self, query: &str, page: u32) -> QueryParams {
        QueryParams::new()
            .with("query", query.trim())
            .with("page", page)
            .with("language", self.language.as_str())
    }

    pub async fn fetch_browse_page(&self, page: u32) -> Result<ListingPage, FetchError> {
        ensure_page(page)?;
        let response = self
            .transport
            .get(&self.paths.browse, &self.browse_params(page))
            .await;
        decode(&self.paths.browse, response)
    }

    pub async fn fetch_search_page(&self, query: &str, page: u32) -> Result<ListingPage, FetchError> {
        ensure_page(page)?;
        if query.trim().is_empty() {
            return Err(FetchError::new(FailureKind::InvalidRequest, "empty search query"));
        }
        let response = self
            .transport
            .get(&self.paths.search, &self.search_params(query, page))
            .await;
        decode(&self.paths.search, response)
    }

    pub async fn fetch_detail(&self, id: u64) -> Result<DetailRecord, FetchError> {
        ensure_id(id)?;
        let path = format!("{}/{}", self.paths.detail_prefix.trim_end_matches('/'), id);
        let response = self.transport.get(&path, &self.language_params()).await;
        decode(&path, response)
    }

    pub async fn fetch_credits(&self, id: u64) -> Result<CreditsRecord, FetchError> {
        ensure_id(id)?;
        let path = format!(
            "{}/{}/credits",
            self.paths.detail_prefix.trim_end_matches('/'),
            id
        );
        let response = self.transport.get(&path, &self.language_params()).await;
        decode(&path, response)
    }

    fn language_params(&self) -> QueryParams {
        QueryParams::new().with("language", self.language.as_str())
    }
}

fn ensure_page(page: u32) -> Result<(), FetchError> {
    if page == 0 {
        return Err(FetchError::new(FailureKind::InvalidRequest, "page must be >= 1"));
    }
    Ok(())
}

fn ensure_id(id: u64) -> Result<(), FetchError> {
    if id == 0 {
        return Err(FetchError::new(FailureKind::InvalidRequest, "listing id must not be empty"));
    }
    Ok(())
}

/// Non-2xx is always a failure; a 2xx body must match `T` completely.
fn decode<T: DeserializeOwned>(
    path: &str,
    response: Result<TransportResponse, TransportError>,
) -> Result<T, FetchError> {
    let response = response.map_err(|err| {
        marquee_warn!("GET {} failed: {}", path, err);
        map_transport_error(err)
    })?;

    if !(200..300).contains(&response.status) {
        marquee_warn!("GET {} returned status {}", path, response.status);
        return Err(FetchError::new(
            FailureKind::HttpStatus(response.status),
            format!("API error: {}", response.status),
        ));
    }

    serde_json::from_slice(&response.body).map_err(|err| {
        marquee_warn!("GET {} returned a malformed body: {}", path, err);
        FetchError::new(
            FailureKind::MalformedResponse,
            format!("malformed response: {err}"),
        )
    })
}

fn map_transport_error(err: TransportError) -> FetchError {
    let kind = match &err {
        TransportError::InvalidUrl(_) => FailureKind::InvalidUrl,
        TransportError::Timeout => FailureKind::Timeout,
        TransportError::Network(_) => FailureKind::Network,
        TransportError::InvalidSettings(_) => FailureKind::InvalidRequest,
    };
    FetchError::new(kind, err.to_string())
}
