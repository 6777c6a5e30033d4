use crate::view_model::{AppViewModel, DetailView, ViewProjection};
use crate::{DetailState, FeedKind, FeedState, Mode};

/// Everything the presentation layer can observe. Only `update` mutates it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    mode: Mode,
    browse: FeedState,
    search: FeedState,
    /// Query the search feed's rows belong to; retained while browsing.
    search_query: Option<String>,
    detail: DetailState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn feed(&self, kind: FeedKind) -> &FeedState {
        match kind {
            FeedKind::Browse => &self.browse,
            FeedKind::Search => &self.search,
        }
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    /// Projection of one feed, independent of which one is active.
    pub fn projection(&self, kind: FeedKind) -> ViewProjection {
        let query = match kind {
            FeedKind::Browse => None,
            FeedKind::Search => self.search_query(),
        };
        ViewProjection::from_feed(kind, self.feed(kind), query)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            mode: self.mode.clone(),
            list: self.projection(self.mode.kind()),
            detail: DetailView::from_state(&self.detail),
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn feed_mut(&mut self, kind: FeedKind) -> &mut FeedState {
        match kind {
            FeedKind::Browse => &mut self.browse,
            FeedKind::Search => &mut self.search,
        }
    }

    pub(crate) fn detail_mut(&mut self) -> &mut DetailState {
        &mut self.detail
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.dirty = true;
        }
    }

    pub(crate) fn set_search_query(&mut self, query: Option<String>) {
        self.search_query = query;
    }
}
