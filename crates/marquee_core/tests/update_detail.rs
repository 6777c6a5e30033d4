use marquee_core::{
    update, AppState, CastMember, Effect, Genre, ListingDetail, ListingId, Msg,
};

fn detail(id: ListingId) -> ListingDetail {
    ListingDetail {
        id,
        title: "Arrival".into(),
        poster_path: None,
        backdrop_path: None,
        vote_average: 7.6,
        release_date: None,
        runtime_minutes: Some(116),
        genres: vec![Genre {
            id: 878,
            name: "Science Fiction".into(),
        }],
        overview: Some("Linguists".into()),
        tagline: None,
    }
}

fn cast() -> Vec<CastMember> {
    vec![CastMember {
        id: 9273,
        name: "Amy Adams".into(),
        character: "Louise Banks".into(),
        profile_path: None,
    }]
}

fn open(id: u64) -> (AppState, ListingId, u64) {
    let id = ListingId::new(id).unwrap();
    let (state, effects) = update(AppState::new(), Msg::OpenDetail(id));
    let generation = match effects.as_slice() {
        [Effect::FetchDetail { generation, .. }, Effect::FetchCredits { .. }] => *generation,
        other => panic!("unexpected effects {other:?}"),
    };
    (state, id, generation)
}

#[test]
fn open_detail_fetches_record_and_credits() {
    let (state, id, generation) = open(329865);
    let view = state.view().detail;
    assert_eq!(view.id, Some(id));
    assert!(view.is_loading);
    assert!(!view.show_retry);

    let (state, _) = update(
        state,
        Msg::DetailLoaded {
            id,
            generation,
            detail: detail(id),
        },
    );
    assert!(state.view().detail.is_loading, "credits still pending");

    let (state, _) = update(
        state,
        Msg::CreditsLoaded {
            id,
            generation,
            cast: cast(),
        },
    );
    let view = state.view().detail;
    assert!(!view.is_loading);
    assert_eq!(view.item.as_ref().map(|d| d.title.as_str()), Some("Arrival"));
    assert_eq!(view.cast, cast());
    assert!(!view.show_retry);
}

#[test]
fn failed_detail_offers_retry() {
    let (state, id, generation) = open(5);
    let (state, _) = update(
        state,
        Msg::DetailFailed {
            id,
            generation,
            message: "API error: 404".into(),
        },
    );
    let (state, _) = update(
        state,
        Msg::CreditsLoaded {
            id,
            generation,
            cast: cast(),
        },
    );

    let view = state.view().detail;
    assert!(view.item.is_none());
    assert!(view.show_retry);
    assert_eq!(view.error.as_deref(), Some("API error: 404"));

    let (state, effects) = update(state, Msg::RetryDetail);
    assert_eq!(effects.len(), 2);
    assert!(state.view().detail.error.is_none());
    assert!(state.view().detail.is_loading);
}

#[test]
fn credits_failure_keeps_loaded_record() {
    let (state, id, generation) = open(5);
    let (state, _) = update(
        state,
        Msg::DetailLoaded {
            id,
            generation,
            detail: detail(id),
        },
    );
    let (state, _) = update(
        state,
        Msg::CreditsFailed {
            id,
            generation,
            message: "timeout".into(),
        },
    );

    let view = state.view().detail;
    assert!(view.item.is_some());
    assert!(view.cast.is_empty());
    assert!(!view.show_retry);
    assert_eq!(view.error.as_deref(), Some("timeout"));
}

#[test]
fn response_for_previous_listing_is_dropped() {
    let (state, first, first_generation) = open(1);
    let second = ListingId::new(2).unwrap();
    let (state, _) = update(state, Msg::OpenDetail(second));

    let (state, _) = update(
        state,
        Msg::DetailLoaded {
            id: first,
            generation: first_generation,
            detail: detail(first),
        },
    );
    let view = state.view().detail;
    assert_eq!(view.id, Some(second));
    assert!(view.item.is_none());
    assert!(view.is_loading);
}

#[test]
fn reopening_while_loading_is_noop() {
    let (state, id, _) = open(3);
    let (next, effects) = update(state.clone(), Msg::OpenDetail(id));
    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn retry_without_request_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::RetryDetail);
    assert!(effects.is_empty());
    assert_eq!(next, state);
}
