use std::sync::mpsc;
use std::thread;

use marquee_core::{
    parse_release_date, CastMember, Effect, FeedKind, FeedPage, Genre, ListingDetail, ListingId,
    ListingItem, Msg, PageNumber,
};
use marquee_engine::wire::{CastRecord, CreditsRecord, DetailRecord, ListingPage, ListingRecord};
use marquee_engine::{EngineCommand, EngineEvent, EngineHandle, FetchError, ListingApi};
use marquee_logging::{marquee_info, marquee_warn};

/// Executes core effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn spawn(
        api: ListingApi,
        deliver: impl Fn(Msg) + Send + 'static,
    ) -> std::io::Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::spawn(api, event_tx)?;

        thread::Builder::new()
            .name("marquee-events".to_string())
            .spawn(move || {
                while let Ok(event) = event_rx.recv() {
                    deliver(event_to_msg(event));
                }
            })?;

        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            marquee_info!("{:?}", effect);
            self.engine.submit(effect_to_command(effect));
        }
    }
}

fn effect_to_command(effect: Effect) -> EngineCommand {
    match effect {
        Effect::FetchBrowsePage { generation, page } => EngineCommand::BrowsePage {
            generation,
            page: page.get(),
        },
        Effect::FetchSearchPage {
            generation,
            query,
            page,
        } => EngineCommand::SearchPage {
            generation,
            query,
            page: page.get(),
        },
        Effect::FetchDetail { generation, id } => EngineCommand::Detail {
            generation,
            id: id.get(),
        },
        Effect::FetchCredits { generation, id } => EngineCommand::Credits {
            generation,
            id: id.get(),
        },
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::BrowsePage {
            generation,
            page,
            result,
        } => page_msg(FeedKind::Browse, generation, page, result),
        EngineEvent::SearchPage {
            generation,
            page,
            result,
        } => page_msg(FeedKind::Search, generation, page, result),
        EngineEvent::Detail {
            generation,
            id,
            result,
        } => {
            let Ok(id) = ListingId::new(id) else {
                return Msg::NoOp;
            };
            match result.and_then(map_detail) {
                Ok(detail) => Msg::DetailLoaded {
                    id,
                    generation,
                    detail,
                },
                Err(err) => Msg::DetailFailed {
                    id,
                    generation,
                    message: err.message,
                },
            }
        }
        EngineEvent::Credits {
            generation,
            id,
            result,
        } => {
            let Ok(id) = ListingId::new(id) else {
                return Msg::NoOp;
            };
            match result {
                Ok(credits) => Msg::CreditsLoaded {
                    id,
                    generation,
                    cast: map_cast(credits),
                },
                Err(err) => Msg::CreditsFailed {
                    id,
                    generation,
                    message: err.message,
                },
            }
        }
    }
}

/// The response must name the page that was asked for; anything else would corrupt pagination.
fn page_msg(
    feed: FeedKind,
    generation: u64,
    requested: u32,
    result: Result<ListingPage, FetchError>,
) -> Msg {
    match result.map(map_page) {
        Ok(Some(page)) if page.page.get() == requested => Msg::PageLoaded {
            feed,
            generation,
            page,
        },
        Ok(Some(page)) => {
            marquee_warn!(
                "{:?} page {} answered with page {}",
                feed,
                requested,
                page.page
            );
            Msg::PageFailed {
                feed,
                generation,
                message: format!(
                    "malformed response: requested page {requested}, got {}",
                    page.page
                ),
            }
        }
        Ok(None) => Msg::PageFailed {
            feed,
            generation,
            message: "malformed response: page 0".to_string(),
        },
        Err(err) => {
            marquee_warn!("{:?} page failed ({}): {}", feed, err.kind, err.message);
            Msg::PageFailed {
                feed,
                generation,
                message: err.message,
            }
        }
    }
}

/// `None` when the response names page 0.
fn map_page(listing: ListingPage) -> Option<FeedPage> {
    let page = PageNumber::new(listing.page).ok()?;
    let items = listing.results.into_iter().filter_map(map_item).collect();
    Some(FeedPage {
        page,
        total_pages: listing.total_pages,
        items,
    })
}

fn map_item(record: ListingRecord) -> Option<ListingItem> {
    let id = match ListingId::new(record.id) {
        Ok(id) => id,
        Err(err) => {
            marquee_warn!("Skipping listing row: {}", err);
            return None;
        }
    };
    Some(ListingItem {
        id,
        title: record.title,
        poster_path: non_empty(record.poster_path),
        vote_average: record.vote_average as f32,
        release_date: parse_release_date(record.release_date.as_deref()),
        overview: record.overview.unwrap_or_default(),
    })
}

fn map_detail(record: DetailRecord) -> Result<ListingDetail, FetchError> {
    let id = ListingId::new(record.id).map_err(|err| FetchError {
        kind: marquee_engine::FailureKind::MalformedResponse,
        message: format!("malformed response: {err}"),
    })?;
    Ok(ListingDetail {
        id,
        title: record.title,
        poster_path: non_empty(record.poster_path),
        backdrop_path: non_empty(record.backdrop_path),
        vote_average: record.vote_average as f32,
        release_date: parse_release_date(record.release_date.as_deref()),
        runtime_minutes: record.runtime,
        genres: record
            .genres
            .into_iter()
            .map(|genre| Genre {
                id: genre.id,
                name: genre.name,
            })
            .collect(),
        overview: non_empty(record.overview),
        tagline: non_empty(record.tagline),
    })
}

fn map_cast(credits: CreditsRecord) -> Vec<CastMember> {
    credits
        .cast
        .into_iter()
        .map(|member: CastRecord| CastMember {
            id: member.id,
            name: member.name,
            character: member.character.unwrap_or_default(),
            profile_path: non_empty(member.profile_path),
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use marquee_engine::FailureKind;

    use super::*;

    fn record(id: u64, date: Option<&str>) -> ListingRecord {
        ListingRecord {
            id,
            title: format!("#{id}"),
            poster_path: Some(String::new()),
            vote_average: 6.0,
            release_date: date.map(str::to_string),
            overview: None,
        }
    }

    #[test]
    fn page_event_becomes_page_loaded() {
        let msg = event_to_msg(EngineEvent::SearchPage {
            generation: 3,
            page: 1,
            result: Ok(ListingPage {
                results: vec![record(1, Some("2001-07-20")), record(0, None), record(2, Some("??"))],
                page: 1,
                total_pages: 4,
            }),
        });

        let Msg::PageLoaded {
            feed,
            generation,
            page,
        } = msg
        else {
            panic!("expected PageLoaded");
        };
        assert_eq!(feed, FeedKind::Search);
        assert_eq!(generation, 3);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.items.len(), 2, "row with id 0 is dropped");
        assert!(page.items[0].release_date.is_some());
        assert_eq!(page.items[1].release_date, None);
        assert_eq!(page.items[0].poster_path, None);
    }

    #[test]
    fn page_zero_is_reported_as_failure() {
        let msg = event_to_msg(EngineEvent::BrowsePage {
            generation: 1,
            page: 1,
            result: Ok(ListingPage {
                results: Vec::new(),
                page: 0,
                total_pages: 0,
            }),
        });
        assert!(matches!(msg, Msg::PageFailed { feed: FeedKind::Browse, .. }));
    }

    #[test]
    fn page_other_than_requested_is_reported_as_failure() {
        let msg = event_to_msg(EngineEvent::SearchPage {
            generation: 4,
            page: 2,
            result: Ok(ListingPage {
                results: vec![record(7, None)],
                page: 1,
                total_pages: 3,
            }),
        });
        assert_eq!(
            msg,
            Msg::PageFailed {
                feed: FeedKind::Search,
                generation: 4,
                message: "malformed response: requested page 2, got 1".into(),
            }
        );
    }

    #[test]
    fn fetch_error_message_is_carried_verbatim() {
        let msg = event_to_msg(EngineEvent::BrowsePage {
            generation: 9,
            page: 2,
            result: Err(FetchError {
                kind: FailureKind::HttpStatus(500),
                message: "API error: 500".into(),
            }),
        });
        assert_eq!(
            msg,
            Msg::PageFailed {
                feed: FeedKind::Browse,
                generation: 9,
                message: "API error: 500".into(),
            }
        );
    }

    #[test]
    fn effects_map_to_engine_commands() {
        let id = ListingId::new(42).unwrap();
        assert_eq!(
            effect_to_command(Effect::FetchCredits { generation: 5, id }),
            EngineCommand::Credits {
                generation: 5,
                id: 42
            }
        );
        assert_eq!(
            effect_to_command(Effect::FetchSearchPage {
                generation: 1,
                query: "abc".into(),
                page: PageNumber::new(2).unwrap(),
            }),
            EngineCommand::SearchPage {
                generation: 1,
                query: "abc".into(),
                page: 2
            }
        );
    }
}
