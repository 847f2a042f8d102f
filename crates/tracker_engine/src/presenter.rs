use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracker_core::{
    update, ActionError, AppState, AppViewModel, AuthMode, BatchAction, Column, Credentials,
    Effect, FilterField, Msg, Notice, PreferencesSnapshot, RequestFailure, SearchCriteria,
};
use tracker_logging::{tracker_debug, tracker_info, tracker_warn};

use crate::debounce::Debouncer;
use crate::Backend;

/// Drives the core state machine: feeds it messages, runs the effects it asks
/// for against a `Backend`, and feeds completions back in.
///
/// Effects run one at a time in emission order, so a batch always sends its
/// remove request before its apply request.
pub struct JobListPresenter {
    state: AppState,
    backend: Arc<dyn Backend>,
    debouncer: Debouncer,
    timer_tx: mpsc::UnboundedSender<Msg>,
    timer_rx: mpsc::UnboundedReceiver<Msg>,
    outbox: Vec<Notice>,
}

impl JobListPresenter {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_state(backend, AppState::new())
    }

    pub fn with_state(backend: Arc<dyn Backend>, state: AppState) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self {
            state,
            backend,
            debouncer: Debouncer::new(),
            timer_tx,
            timer_rx,
            outbox: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    /// Notices produced since the last call, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.outbox)
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.dispatch_local(Msg::FilterChanged {
            field,
            value: value.into(),
        });
    }

    pub fn set_sort(&mut self, column: Column) {
        self.dispatch_local(Msg::SortClicked(column));
    }

    pub fn clear_filters(&mut self) {
        self.debouncer.cancel();
        self.dispatch_local(Msg::ClearFilters);
    }

    pub fn set_show_ignored(&mut self, show: bool) {
        self.dispatch_local(Msg::ShowIgnoredToggled(show));
    }

    pub fn set_selected(&mut self, action: BatchAction, url: impl Into<String>, selected: bool) {
        self.dispatch_local(Msg::SelectionToggled {
            action,
            url: url.into(),
            selected,
        });
    }

    /// Restores saved filters, sort and the ignored toggle in one step.
    pub fn restore_preferences(&mut self, snapshot: PreferencesSnapshot) {
        self.debouncer.cancel();
        self.dispatch_local(Msg::RestorePreferences(snapshot));
    }

    /// Waits for the debounce timer and returns its message.
    pub async fn next_timer_msg(&mut self) -> Option<Msg> {
        self.timer_rx.recv().await
    }

    /// Waits for the pending debounce, if any, and applies it.
    ///
    /// Timer messages left over from earlier schedules are applied (and ignored
    /// by the core as stale) on the way to the current one.
    pub async fn settle(&mut self) {
        let current = self.state.debounce_generation();
        while self.debouncer.is_pending() || !self.timer_rx.is_empty() {
            let Some(msg) = self.next_timer_msg().await else {
                return;
            };
            let reached = matches!(msg, Msg::DebounceElapsed { generation } if generation == current);
            self.dispatch_local(msg);
            if reached {
                return;
            }
        }
    }

    pub async fn submit_search(&mut self, criteria: SearchCriteria) -> Result<(), ActionError> {
        self.run(Msg::SearchSubmitted(criteria)).await
    }

    pub async fn refresh(&mut self, silent: bool) -> Result<(), ActionError> {
        self.run(Msg::RefreshClicked { silent }).await
    }

    pub async fn batch_process(&mut self) -> Result<(), ActionError> {
        self.run(Msg::BatchClicked).await
    }

    /// Returns whether the backend still recognizes the session.
    pub async fn check_session(&mut self) -> Result<bool, ActionError> {
        self.run(Msg::SessionCheckRequested).await?;
        Ok(self.state.logged_in())
    }

    pub async fn login(&mut self, credentials: Credentials) -> Result<(), ActionError> {
        self.run(Msg::LoginSubmitted(credentials)).await
    }

    pub async fn register(&mut self, credentials: Credentials) -> Result<(), ActionError> {
        self.run(Msg::RegisterSubmitted(credentials)).await
    }

    pub async fn logout(&mut self) -> Result<(), ActionError> {
        self.run(Msg::LogoutClicked).await
    }

    pub async fn upload_resume(&mut self, path: PathBuf) -> Result<(), ActionError> {
        self.run(Msg::ResumeSelected(path)).await
    }

    /// Applies `msg` and every message its effects lead to.
    ///
    /// Returns the first error notice raised along the way.
    pub async fn run(&mut self, msg: Msg) -> Result<(), ActionError> {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            for effect in self.apply(msg) {
                if let Some(completion) = self.execute(effect).await {
                    queue.push_back(completion);
                }
            }
        }
        self.collect_notices()
    }

    /// Applies a message whose effects never touch the network.
    pub fn dispatch_local(&mut self, msg: Msg) {
        for effect in self.apply(msg) {
            match effect {
                Effect::ScheduleRecompute { generation, delay } => {
                    self.schedule_recompute(generation, delay)
                }
                other => tracker_warn!("Dropping network effect from local dispatch: {:?}", other),
            }
        }
        let _ = self.collect_notices();
    }

    fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    fn collect_notices(&mut self) -> Result<(), ActionError> {
        let notices = self.state.take_notices();
        let first_error = notices.iter().find_map(|notice| notice.error.clone());
        self.outbox.extend(notices);
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn schedule_recompute(&mut self, generation: u64, delay: std::time::Duration) {
        let tx = self.timer_tx.clone();
        self.debouncer.schedule(delay, move || {
            let _ = tx.send(Msg::DebounceElapsed { generation });
        });
    }

    async fn execute(&mut self, effect: Effect) -> Option<Msg> {
        let backend = self.backend.clone();
        let msg = match effect {
            Effect::ScheduleRecompute { generation, delay } => {
                self.schedule_recompute(generation, delay);
                return None;
            }
            Effect::SubmitSearch(request) => {
                Msg::SearchCompleted(backend.submit_search(&request).await.map_err(failure))
            }
            Effect::FetchJobs { origin } => Msg::JobsLoaded {
                origin,
                result: backend.fetch_jobs().await.map_err(failure),
            },
            Effect::RemoveJobs { urls } => Msg::BatchStepCompleted {
                action: BatchAction::Remove,
                result: backend.remove_jobs(&urls).await.map_err(failure),
            },
            Effect::ApplyJobs { urls } => Msg::BatchStepCompleted {
                action: BatchAction::Apply,
                result: backend.apply_jobs(&urls).await.map_err(failure),
            },
            Effect::Login(credentials) => Msg::AuthCompleted {
                mode: AuthMode::Login,
                result: backend.login(&credentials).await.map_err(failure),
            },
            Effect::Register(credentials) => Msg::AuthCompleted {
                mode: AuthMode::Register,
                result: backend.register(&credentials).await.map_err(failure),
            },
            Effect::Logout => Msg::LogoutCompleted(backend.logout().await.map_err(failure)),
            Effect::CheckSession => {
                Msg::SessionChecked(backend.session_status().await.map_err(failure))
            }
            Effect::UploadResume { path } => {
                let result = backend.upload_resume(&path).await.map_err(failure);
                Msg::ResumeUploaded(result.map(|parsed| {
                    tracker_info!("Parsed resume {}", path.display());
                    tracker_debug!("Parsed resume body: {}", parsed);
                }))
            }
        };
        Some(msg)
    }
}

fn failure(err: crate::BackendError) -> RequestFailure {
    tracker_warn!("Backend call failed: {}", err);
    err.into()
}
