use marquee_logging::marquee_debug;

use crate::{AppState, Effect, FeedKind, ListingId, Mode, Msg, PageNumber};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RequestPage { feed, page } => request_page(&mut state, feed, page, true),
        Msg::SubmitSearch(raw) => submit_search(&mut state, &raw),
        Msg::SwitchToSearch(raw) => {
            let query = raw.trim();
            if query.is_empty() {
                clear_search(&mut state)
            } else if state.search_query() == Some(query) {
                state.set_mode(Mode::Search {
                    query: query.to_string(),
                });
                Vec::new()
            } else {
                submit_search(&mut state, query)
            }
        }
        Msg::SwitchToBrowse => {
            state.set_mode(Mode::Browse);
            Vec::new()
        }
        Msg::ClearSearch => clear_search(&mut state),
        Msg::PullToRefresh => {
            let kind = state.mode().kind();
            request_page(&mut state, kind, PageNumber::FIRST, false)
        }
        Msg::RequestNextPage => request_next_page(&mut state),
        Msg::OpenDetail(id) => open_detail(&mut state, id),
        Msg::RetryDetail => {
            let detail = state.detail();
            match detail.id() {
                Some(id) if !detail.is_loading() => open_detail(&mut state, id),
                _ => Vec::new(),
            }
        }
        Msg::PageLoaded {
            feed,
            generation,
            page,
        } => {
            if is_stale_page(&state, feed, generation) {
                marquee_debug!(
                    "Dropping stale {:?} page {} (generation {}, current {})",
                    feed,
                    page.page,
                    generation,
                    state.feed(feed).generation()
                );
            } else {
                state.feed_mut(feed).apply_page(page);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PageFailed {
            feed,
            generation,
            message,
        } => {
            if is_stale_page(&state, feed, generation) {
                marquee_debug!(
                    "Dropping stale {:?} failure (generation {}): {}",
                    feed,
                    generation,
                    message
                );
            } else {
                state.feed_mut(feed).apply_failure(message);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DetailLoaded {
            id,
            generation,
            detail,
        } => {
            if state.detail().is_current(id, generation) {
                state.detail_mut().apply_detail(detail);
                state.mark_dirty();
            } else {
                marquee_debug!("Dropping stale detail for {} (generation {})", id, generation);
            }
            Vec::new()
        }
        Msg::DetailFailed {
            id,
            generation,
            message,
        } => {
            if state.detail().is_current(id, generation) {
                state.detail_mut().apply_detail_failure(message);
                state.mark_dirty();
            } else {
                marquee_debug!("Dropping stale detail failure for {}", id);
            }
            Vec::new()
        }
        Msg::CreditsLoaded {
            id,
            generation,
            cast,
        } => {
            if state.detail().is_current(id, generation) {
                state.detail_mut().apply_credits(cast);
                state.mark_dirty();
            } else {
                marquee_debug!("Dropping stale credits for {} (generation {})", id, generation);
            }
            Vec::new()
        }
        Msg::CreditsFailed {
            id,
            generation,
            message,
        } => {
            if state.detail().is_current(id, generation) {
                state.detail_mut().apply_credits_failure(message);
                state.mark_dirty();
            } else {
                marquee_debug!("Dropping stale credits failure for {}", id);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn is_stale_page(state: &AppState, feed: FeedKind, generation: u64) -> bool {
    let current = state.feed(feed);
    !current.is_loading() || current.generation() != generation
}

/// `reset_on_first`: a page-1 request clears the rows now instead of when the response lands.
fn request_page(
    state: &mut AppState,
    feed: FeedKind,
    page: PageNumber,
    reset_on_first: bool,
) -> Vec<Effect> {
    let current = state.feed(feed);
    if current.is_loading() && current.pending_page() == Some(page) {
        marquee_debug!("{:?} page {} already in flight", feed, page);
        return Vec::new();
    }

    let query = match feed {
        FeedKind::Browse => None,
        FeedKind::Search => match state.search_query() {
            Some(query) => Some(query.to_string()),
            None => {
                marquee_debug!("Search page {} requested without a query", page);
                return Vec::new();
            }
        },
    };

    let reset = reset_on_first && page.is_first();
    let generation = state.feed_mut(feed).begin(page, reset);
    state.mark_dirty();

    let effect = match query {
        None => Effect::FetchBrowsePage { generation, page },
        Some(query) => Effect::FetchSearchPage {
            generation,
            query,
            page,
        },
    };
    vec![effect]
}

fn request_next_page(state: &mut AppState) -> Vec<Effect> {
    let kind = state.mode().kind();
    let feed = state.feed(kind);
    if feed.is_loading() {
        return Vec::new();
    }
    let pagination = feed.pagination();
    if !pagination.has_more {
        return Vec::new();
    }
    request_page(state, kind, pagination.current_page.next(), true)
}

fn submit_search(state: &mut AppState, raw: &str) -> Vec<Effect> {
    let query = raw.trim();
    if query.is_empty() {
        return clear_search(state);
    }

    state.set_search_query(Some(query.to_string()));
    state.set_mode(Mode::Search {
        query: query.to_string(),
    });
    state.feed_mut(FeedKind::Search).reset();
    request_page(state, FeedKind::Search, PageNumber::FIRST, true)
}

fn clear_search(state: &mut AppState) -> Vec<Effect> {
    state.feed_mut(FeedKind::Search).reset();
    state.set_search_query(None);
    state.set_mode(Mode::Browse);
    state.mark_dirty();

    if state.feed(FeedKind::Browse).has_started() {
        Vec::new()
    } else {
        request_page(state, FeedKind::Browse, PageNumber::FIRST, true)
    }
}

fn open_detail(state: &mut AppState, id: ListingId) -> Vec<Effect> {
    let detail = state.detail();
    if detail.id() == Some(id) && detail.is_loading() {
        return Vec::new();
    }

    let generation = state.detail_mut().begin(id);
    state.mark_dirty();
    vec![
        Effect::FetchDetail { generation, id },
        Effect::FetchCredits { generation, id },
    ]
}
