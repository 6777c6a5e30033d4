//! Marquee core: pure feed state machine and view-model helpers.
mod detail;
mod effect;
mod feed;
mod ids;
mod item;
mod msg;
mod state;
mod update;
mod view_model;

pub use detail::DetailState;
pub use effect::Effect;
pub use feed::{FeedKind, FeedState, Mode, Pagination};
pub use ids::{ListingId, PageNumber, ValidationError};
pub use item::{
    parse_release_date, CastMember, FeedPage, Genre, ImageSize, ListingDetail, ListingItem,
    PLACEHOLDER_POSTER_URL, UNKNOWN_RELEASE_LABEL,
};
pub use msg::Msg;
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, DetailView, EmptyReason, FeedFooter, ViewProjection};
