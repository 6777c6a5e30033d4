use marquee_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn next_page_before_any_load_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::RequestNextPage);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
