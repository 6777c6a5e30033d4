use crate::{ListingId, PageNumber};

/// A fetch the runtime must perform. The tag fields come back on the matching lifecycle `Msg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchBrowsePage {
        generation: u64,
        page: PageNumber,
    },
    FetchSearchPage {
        generation: u64,
        query: String,
        page: PageNumber,
    },
    FetchDetail {
        generation: u64,
        id: ListingId,
    },
    FetchCredits {
        generation: u64,
        id: ListingId,
    },
}
