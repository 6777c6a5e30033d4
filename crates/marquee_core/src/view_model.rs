use crate::{CastMember, DetailState, FeedKind, FeedState, ListingDetail, ListingId, ListingItem, Mode};

/// Why an empty list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The search feed holds no rows for this query.
    NoResults { query: String },
    /// The browse feed has nothing to show yet.
    NoDataYet,
}

/// What to draw below the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFooter {
    #[default]
    Hidden,
    Loading,
    NoMore,
}

/// Derived list view. Recomputed from `FeedState` alone; holds no state of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewProjection {
    pub feed: FeedKind,
    pub items: Vec<ListingItem>,
    pub is_loading: bool,
    pub has_more: bool,
    pub is_empty: bool,
    pub empty_reason: Option<EmptyReason>,
    pub error: Option<String>,
    pub footer: FeedFooter,
}

impl ViewProjection {
    pub fn from_feed(kind: FeedKind, feed: &FeedState, query: Option<&str>) -> Self {
        let items = feed.items().to_vec();
        let is_loading = feed.is_loading();
        let has_more = feed.pagination().has_more;
        let is_empty = items.is_empty() && !is_loading;

        let empty_reason = if is_empty {
            Some(match (kind, query) {
                (FeedKind::Search, Some(query)) => EmptyReason::NoResults {
                    query: query.to_string(),
                },
                _ => EmptyReason::NoDataYet,
            })
        } else {
            None
        };

        let footer = if items.is_empty() {
            FeedFooter::Hidden
        } else if is_loading {
            FeedFooter::Loading
        } else if !has_more {
            FeedFooter::NoMore
        } else {
            FeedFooter::Hidden
        };

        Self {
            feed: kind,
            items,
            is_loading,
            has_more,
            is_empty,
            empty_reason,
            error: feed.error().map(str::to_string),
            footer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailView {
    pub id: Option<ListingId>,
    pub item: Option<ListingDetail>,
    pub cast: Vec<CastMember>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// A missing record after loading settles means "offer retry", never "empty success".
    pub show_retry: bool,
}

impl DetailView {
    pub fn from_state(detail: &DetailState) -> Self {
        let is_loading = detail.is_loading();
        Self {
            id: detail.id(),
            item: detail.item().cloned(),
            cast: detail.credits().map(<[CastMember]>::to_vec).unwrap_or_default(),
            is_loading,
            error: detail.error().map(str::to_string),
            show_retry: detail.id().is_some() && !is_loading && detail.item().is_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub mode: Mode,
    pub list: ViewProjection,
    pub detail: DetailView,
}
