use folio_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_does_not_mark_dirty() {
    let mut state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::Tick);

    assert!(effects.is_empty());
    assert_eq!(state.consume_dirty(), next.consume_dirty());
}
