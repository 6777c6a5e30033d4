use crate::{CastMember, FeedKind, FeedPage, ListingDetail, ListingId, PageNumber};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Fetch a specific page of a feed. Page 1 clears the feed's rows first.
    RequestPage { feed: FeedKind, page: PageNumber },
    /// User submitted the search box. Blank text clears the search.
    SubmitSearch(String),
    /// Show search results for `query`, reusing retained results when the query matches.
    SwitchToSearch(String),
    /// Show the browse feed without touching either feed.
    SwitchToBrowse,
    /// Drop the search feed and go back to browsing.
    ClearSearch,
    /// Reload page 1 of the active feed, keeping rows visible until it lands.
    PullToRefresh,
    /// List scrolled near its end.
    RequestNextPage,
    /// User opened the detail screen for a listing.
    OpenDetail(ListingId),
    /// User asked to retry a failed detail load.
    RetryDetail,
    /// A page fetch finished successfully.
    PageLoaded {
        feed: FeedKind,
        generation: u64,
        page: FeedPage,
    },
    /// A page fetch failed; `message` is shown to the user.
    PageFailed {
        feed: FeedKind,
        generation: u64,
        message: String,
    },
    DetailLoaded {
        id: ListingId,
        generation: u64,
        detail: ListingDetail,
    },
    DetailFailed {
        id: ListingId,
        generation: u64,
        message: String,
    },
    CreditsLoaded {
        id: ListingId,
        generation: u64,
        cast: Vec<CastMember>,
    },
    CreditsFailed {
        id: ListingId,
        generation: u64,
        message: String,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
