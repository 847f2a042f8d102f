use tracker_core::{
    update, ActionError, AppState, BatchAction, BatchPhase, Effect, FetchOrigin, Job, JobStatus,
    Msg, NoticeLevel, Operation, RequestFailure,
};

fn job(slug: &str) -> Job {
    Job {
        title: Some(slug.to_string()),
        url: Some(format!("https://jobs.example.com/{slug}")),
        status: Some(JobStatus::New),
        ..Job::default()
    }
}

fn url(slug: &str) -> String {
    format!("https://jobs.example.com/{slug}")
}

fn loaded(jobs: Vec<Job>) -> AppState {
    let (mut state, _) = update(
        AppState::new(),
        Msg::JobsLoaded {
            origin: FetchOrigin::Refresh { silent: true },
            result: Ok(jobs),
        },
    );
    state.take_notices();
    state
}

fn select(state: AppState, action: BatchAction, slug: &str) -> AppState {
    update(
        state,
        Msg::SelectionToggled {
            action,
            url: url(slug),
            selected: true,
        },
    )
    .0
}

#[test]
fn empty_selection_warns_without_effects() {
    let state = loaded(vec![job("a"), job("b")]);
    let (mut state, effects) = update(state, Msg::BatchClicked);

    assert!(effects.is_empty());
    assert_eq!(state.busy(), None);
    let notices = state.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert_eq!(notices[0].error, Some(ActionError::NoSelection));
}

#[test]
fn selection_ignores_unknown_urls_and_missing_url_jobs() {
    let mut no_url = job("c");
    no_url.url = None;
    let state = loaded(vec![job("a"), no_url]);
    let state = select(state, BatchAction::Remove, "zzz");
    let state = select(state, BatchAction::Remove, "c");
    assert!(state.selection().is_empty());
}

#[test]
fn remove_then_apply_then_silent_refresh() {
    let state = loaded(vec![job("a"), job("b"), job("c")]);
    let state = select(state, BatchAction::Remove, "a");
    let state = select(state, BatchAction::Apply, "b");
    let state = select(state, BatchAction::Apply, "c");

    let (state, effects) = update(state, Msg::BatchClicked);
    assert_eq!(effects, vec![Effect::RemoveJobs { urls: vec![url("a")] }]);
    assert_eq!(state.busy(), Some(Operation::Batch));
    assert!(state.view().is_busy());

    let (state, effects) = update(
        state,
        Msg::BatchStepCompleted {
            action: BatchAction::Remove,
            result: Ok(()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ApplyJobs {
            urls: vec![url("b"), url("c")]
        }]
    );
    assert_eq!(state.batch_phase(), &BatchPhase::Applying);

    let (state, effects) = update(
        state,
        Msg::BatchStepCompleted {
            action: BatchAction::Apply,
            result: Ok(()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::FetchJobs {
            origin: FetchOrigin::AfterBatch
        }]
    );
    assert_eq!(state.batch_phase(), &BatchPhase::Refreshing);

    let mut applied = job("b");
    applied.status = Some(JobStatus::Applied);
    let (mut state, effects) = update(
        state,
        Msg::JobsLoaded {
            origin: FetchOrigin::AfterBatch,
            result: Ok(vec![applied, job("c")]),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.batch_phase(), &BatchPhase::Idle);
    assert_eq!(state.busy(), None);
    assert!(state.selection().is_empty());
    assert_eq!(state.jobs().len(), 2);
    let notices = state.take_notices();
    assert_eq!(notices.last().unwrap().level, NoticeLevel::Success);
}

#[test]
fn apply_only_batch_skips_remove() {
    let state = loaded(vec![job("a")]);
    let state = select(state, BatchAction::Apply, "a");
    let (state, effects) = update(state, Msg::BatchClicked);
    assert_eq!(effects, vec![Effect::ApplyJobs { urls: vec![url("a")] }]);
    assert_eq!(state.batch_phase(), &BatchPhase::Applying);
}

#[test]
fn remove_only_batch_goes_straight_to_refresh() {
    let state = loaded(vec![job("a")]);
    let state = select(state, BatchAction::Remove, "a");
    let (state, _) = update(state, Msg::BatchClicked);
    let (_state, effects) = update(
        state,
        Msg::BatchStepCompleted {
            action: BatchAction::Remove,
            result: Ok(()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::FetchJobs {
            origin: FetchOrigin::AfterBatch
        }]
    );
}

#[test]
fn failed_remove_aborts_apply_and_refresh() {
    let state = loaded(vec![job("a"), job("b")]);
    let state = select(state, BatchAction::Remove, "a");
    let state = select(state, BatchAction::Apply, "b");
    let (state, _) = update(state, Msg::BatchClicked);

    let (mut state, effects) = update(
        state,
        Msg::BatchStepCompleted {
            action: BatchAction::Remove,
            result: Err(RequestFailure::with_status(500, "Internal Server Error")),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.batch_phase(), &BatchPhase::Idle);
    assert_eq!(state.busy(), None);
    // Selection survives so the user can retry.
    assert_eq!(state.selection().count(BatchAction::Apply), 1);
    let notices = state.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(matches!(notices[0].error, Some(ActionError::Network(_))));
}

#[test]
fn second_batch_while_running_is_rejected() {
    let state = loaded(vec![job("a")]);
    let state = select(state, BatchAction::Remove, "a");
    let (state, _) = update(state, Msg::BatchClicked);
    let (mut state, effects) = update(state, Msg::BatchClicked);
    assert!(effects.is_empty());
    let notices = state.take_notices();
    assert_eq!(
        notices.last().unwrap().error,
        Some(ActionError::Busy(Operation::Batch))
    );
}

#[test]
fn stray_step_completion_is_ignored() {
    let state = loaded(vec![job("a")]);
    let before = state.clone();
    let (next, effects) = update(
        state,
        Msg::BatchStepCompleted {
            action: BatchAction::Apply,
            result: Ok(()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(next, before);
}

#[test]
fn replacing_jobs_prunes_stale_selection() {
    let state = loaded(vec![job("a"), job("b")]);
    let state = select(state, BatchAction::Remove, "a");
    let state = select(state, BatchAction::Remove, "b");
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            origin: FetchOrigin::Refresh { silent: true },
            result: Ok(vec![job("b")]),
        },
    );
    assert_eq!(state.selection().urls(BatchAction::Remove), vec![url("b")]);
}

#[test]
fn table_marks_selected_rows() {
    let state = loaded(vec![job("a"), job("b")]);
    let state = select(state, BatchAction::Apply, "b");
    let view = state.view();
    assert_eq!(view.selected_for_apply, 1);
    let labels: Vec<&str> = view.table.headers.iter().map(|h| h.label.as_str()).collect();
    let apply_col = labels.iter().position(|label| *label == "Apply").unwrap();
    let row_b = view
        .table
        .rows
        .iter()
        .find(|row| row.url.as_deref() == Some(url("b").as_str()))
        .unwrap();
    assert_eq!(row_b.cells[apply_col], "[x]");
}
