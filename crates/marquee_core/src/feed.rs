use crate::{FeedPage, ListingItem, PageNumber};

/// Names one of the two feed slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Browse,
    Search,
}

/// Which feed is projected; `Search` carries the active query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    Search {
        query: String,
    },
}

impl Mode {
    pub fn kind(&self) -> FeedKind {
        match self {
            Mode::Browse => FeedKind::Browse,
            Mode::Search { .. } => FeedKind::Search,
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            Mode::Browse => None,
            Mode::Search { query } => Some(query),
        }
    }
}

/// Invariant: `has_more == current_page < total_pages`. `total_pages == 0` means nothing loaded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: PageNumber,
    pub total_pages: u32,
    pub has_more: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: PageNumber::FIRST,
            total_pages: 0,
            has_more: false,
        }
    }
}

impl Pagination {
    pub fn after(page: PageNumber, total_pages: u32) -> Self {
        Self {
            current_page: page,
            total_pages,
            has_more: page.get() < total_pages,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.total_pages == 0
    }
}

/// Accumulated state of one feed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedState {
    items: Vec<ListingItem>,
    pagination: Pagination,
    loading: bool,
    error: Option<String>,
    pending_page: Option<PageNumber>,
    generation: u64,
}

impl FeedState {
    pub fn items(&self) -> &[ListingItem] {
        &self.items
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Page currently in flight, if any.
    pub fn pending_page(&self) -> Option<PageNumber> {
        self.pending_page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once any page has been applied, or a fetch is underway.
    pub fn has_started(&self) -> bool {
        self.loading || !self.pagination.is_unknown() || !self.items.is_empty()
    }

    /// Starts a fetch and returns the generation its response must carry.
    pub(crate) fn begin(&mut self, page: PageNumber, reset_items: bool) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.pending_page = Some(page);
        if reset_items {
            self.items.clear();
        }
        self.generation
    }

    pub(crate) fn apply_page(&mut self, page: FeedPage) {
        if page.page.is_first() {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.pagination = Pagination::after(page.page, page.total_pages);
        self.loading = false;
        self.pending_page = None;
    }

    pub(crate) fn apply_failure(&mut self, message: String) {
        self.loading = false;
        self.pending_page = None;
        self.error = Some(message);
    }

    /// Back to the initial empty value. The generation keeps counting so
    /// responses issued before the reset are still recognized as stale.
    pub(crate) fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }
}
