use tracker_core::{update, AppState, BatchAction, Column, FetchOrigin, Job, Msg};

#[test]
fn noop_leaves_state_untouched() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn non_sortable_column_and_unknown_selection_change_nothing() {
    let (mut state, _) = update(
        AppState::new(),
        Msg::JobsLoaded {
            origin: FetchOrigin::Refresh { silent: true },
            result: Ok(vec![Job {
                url: Some("https://jobs.example.com/a".to_string()),
                ..Job::default()
            }]),
        },
    );
    state.consume_dirty();
    let before = state.clone();

    let (state, effects) = update(state, Msg::SortClicked(Column::Remove));
    assert!(effects.is_empty());
    let (mut state, effects) = update(
        state,
        Msg::SelectionToggled {
            action: BatchAction::Apply,
            url: "https://elsewhere.example.com/z".to_string(),
            selected: true,
        },
    );
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state, before);
}
