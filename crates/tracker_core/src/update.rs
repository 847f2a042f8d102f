use crate::{
    ActionError, AppState, AuthMode, BatchAction, BatchPhase, Effect, FetchOrigin, Job, Msg,
    NoticeLevel, Operation, RequestFailure,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilterChanged { field, value } => {
            let generation = state.set_pending_filter(field, value);
            vec![Effect::ScheduleRecompute {
                generation,
                delay: state.debounce_delay(),
            }]
        }
        Msg::DebounceElapsed { generation } => {
            state.apply_pending_filter(generation);
            Vec::new()
        }
        Msg::SortClicked(column) => {
            state.toggle_sort(column);
            Vec::new()
        }
        Msg::ClearFilters => {
            state.clear_filters();
            Vec::new()
        }
        Msg::ShowIgnoredToggled(show) => {
            state.set_show_ignored(show);
            Vec::new()
        }
        Msg::SelectionToggled {
            action,
            url,
            selected,
        } => {
            state.toggle_selection(action, &url, selected);
            Vec::new()
        }
        Msg::RestorePreferences(snapshot) => {
            state.restore_preferences(snapshot);
            Vec::new()
        }
        Msg::SearchSubmitted(criteria) => match criteria.validate() {
            Ok(request) => begin(&mut state, Operation::Search, Effect::SubmitSearch(request)),
            Err(err) => {
                state.notify_error(err);
                Vec::new()
            }
        },
        Msg::SearchCompleted(result) => {
            state.release();
            match result {
                Ok(jobs) => {
                    let count = jobs.len();
                    state.replace_jobs(jobs);
                    state.notify(
                        NoticeLevel::Success,
                        format!("Search complete: {count} job(s) loaded."),
                    );
                }
                Err(failure) => state.notify_error(ActionError::Submission(failure)),
            }
            Vec::new()
        }
        Msg::RefreshClicked { silent } => begin(
            &mut state,
            Operation::Refresh,
            Effect::FetchJobs {
                origin: FetchOrigin::Refresh { silent },
            },
        ),
        Msg::JobsLoaded { origin, result } => {
            on_jobs_loaded(&mut state, origin, result);
            Vec::new()
        }
        Msg::BatchClicked => start_batch(&mut state),
        Msg::BatchStepCompleted { action, result } => on_batch_step(&mut state, action, result),
        Msg::SessionCheckRequested => {
            begin(&mut state, Operation::SessionCheck, Effect::CheckSession)
        }
        Msg::SessionChecked(result) => match result {
            Ok(true) => {
                state.log_in(None);
                vec![Effect::FetchJobs {
                    origin: FetchOrigin::SessionRestore,
                }]
            }
            Ok(false) => {
                state.release();
                // An expired session drops its data; a fresh start keeps restored preferences.
                if state.logged_in() {
                    state.log_out();
                }
                state.notify(NoticeLevel::Info, "Please log in to see your jobs.");
                Vec::new()
            }
            Err(failure) => {
                state.release();
                state.notify_error(ActionError::Network(failure));
                Vec::new()
            }
        },
        Msg::LoginSubmitted(credentials) => match credentials.validate() {
            Ok(valid) => begin(&mut state, Operation::Login, Effect::Login(valid)),
            Err(err) => {
                state.notify_error(err);
                Vec::new()
            }
        },
        Msg::RegisterSubmitted(credentials) => match credentials.validate() {
            Ok(valid) => begin(&mut state, Operation::Register, Effect::Register(valid)),
            Err(err) => {
                state.notify_error(err);
                Vec::new()
            }
        },
        Msg::AuthCompleted { mode, result } => match result {
            Ok(email) => {
                let message = match mode {
                    AuthMode::Login => "Logged in.",
                    AuthMode::Register => "Account created.",
                };
                state.log_in(email);
                state.notify(NoticeLevel::Success, message);
                // Busy slot stays claimed until the job list arrives.
                vec![Effect::FetchJobs {
                    origin: FetchOrigin::AfterLogin,
                }]
            }
            Err(failure) => {
                state.release();
                state.notify_error(ActionError::Submission(failure));
                Vec::new()
            }
        },
        Msg::LogoutClicked => begin(&mut state, Operation::Logout, Effect::Logout),
        Msg::LogoutCompleted(result) => {
            state.release();
            match result {
                Ok(()) => {
                    state.log_out();
                    state.notify(NoticeLevel::Info, "Logged out.");
                }
                Err(failure) => state.notify_error(ActionError::Network(failure)),
            }
            Vec::new()
        }
        Msg::ResumeSelected(path) => {
            if path.as_os_str().is_empty() {
                state.notify_error(ActionError::Validation(
                    "Please choose a resume file to upload.".to_string(),
                ));
                Vec::new()
            } else {
                begin(
                    &mut state,
                    Operation::ResumeUpload,
                    Effect::UploadResume { path },
                )
            }
        }
        Msg::ResumeUploaded(result) => {
            state.release();
            match result {
                Ok(()) => state.notify(NoticeLevel::Success, "Resume uploaded."),
                Err(failure) => state.notify_error(ActionError::Submission(failure)),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Claims the busy slot and emits `effect`, or reports the conflict.
fn begin(state: &mut AppState, operation: Operation, effect: Effect) -> Vec<Effect> {
    match state.try_begin(operation) {
        Ok(()) => vec![effect],
        Err(err) => {
            state.notify_error(err);
            Vec::new()
        }
    }
}

fn on_jobs_loaded(
    state: &mut AppState,
    origin: FetchOrigin,
    result: Result<Vec<Job>, RequestFailure>,
) {
    if origin == FetchOrigin::AfterBatch {
        state.set_batch_phase(BatchPhase::Idle);
    }
    // Chained fetches hold the slot of the operation that started them.
    state.release();

    let jobs = match result {
        Ok(jobs) => jobs,
        Err(failure) => {
            state.notify_error(ActionError::Network(failure));
            return;
        }
    };
    let count = jobs.len();
    state.replace_jobs(jobs);

    match origin {
        FetchOrigin::Refresh { silent: false } => {
            state.notify(
                NoticeLevel::Success,
                format!("Jobs refreshed: {count} job(s)."),
            );
        }
        FetchOrigin::AfterBatch => {
            state.clear_selection();
            state.notify(
                NoticeLevel::Success,
                "Selected jobs processed successfully.",
            );
        }
        FetchOrigin::Refresh { silent: true }
        | FetchOrigin::AfterLogin
        | FetchOrigin::SessionRestore => {}
    }
}

fn start_batch(state: &mut AppState) -> Vec<Effect> {
    let to_remove = state.selection().urls(BatchAction::Remove);
    let to_apply = state.selection().urls(BatchAction::Apply);
    if to_remove.is_empty() && to_apply.is_empty() {
        state.notify_error(ActionError::NoSelection);
        return Vec::new();
    }

    if let Err(err) = state.try_begin(Operation::Batch) {
        state.notify_error(err);
        return Vec::new();
    }
    if to_remove.is_empty() {
        state.set_batch_phase(BatchPhase::Applying);
        vec![Effect::ApplyJobs { urls: to_apply }]
    } else {
        state.set_batch_phase(BatchPhase::Removing {
            pending_apply: to_apply,
        });
        vec![Effect::RemoveJobs { urls: to_remove }]
    }
}

fn on_batch_step(
    state: &mut AppState,
    action: BatchAction,
    result: Result<(), RequestFailure>,
) -> Vec<Effect> {
    let pending_apply = match (state.batch_phase(), action) {
        (BatchPhase::Removing { pending_apply }, BatchAction::Remove) => pending_apply.clone(),
        (BatchPhase::Applying, BatchAction::Apply) => Vec::new(),
        // Completion for a step this run never issued.
        _ => return Vec::new(),
    };

    if let Err(failure) = result {
        // Steps already sent are not rolled back.
        state.set_batch_phase(BatchPhase::Idle);
        state.release();
        state.notify_error(ActionError::Network(failure));
        return Vec::new();
    }

    if pending_apply.is_empty() {
        state.set_batch_phase(BatchPhase::Refreshing);
        vec![Effect::FetchJobs {
            origin: FetchOrigin::AfterBatch,
        }]
    } else {
        state.set_batch_phase(BatchPhase::Applying);
        vec![Effect::ApplyJobs {
            urls: pending_apply,
        }]
    }
}
