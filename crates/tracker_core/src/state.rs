use std::collections::{BTreeSet, VecDeque};
use std::time::Duration;

use crate::pipeline::compute_view;
use crate::table::{default_columns, TableBuilder};
use crate::view_model::AppViewModel;
use crate::{
    ActionError, BatchAction, Column, FilterField, FilterState, Job, Operation, SortState,
};

/// Delay used to coalesce filter keystrokes into one recompute.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Progress of a batch run. `Validating` happens inside a single update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BatchPhase {
    #[default]
    Idle,
    /// Remove request in flight; `pending_apply` is sent next.
    Removing { pending_apply: Vec<String> },
    Applying,
    Refreshing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub error: Option<ActionError>,
}

/// URLs ticked in the Remove and Apply columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    to_remove: BTreeSet<String>,
    to_apply: BTreeSet<String>,
}

impl Selection {
    pub fn is_marked_for_removal(&self, url: &str) -> bool {
        self.to_remove.contains(url)
    }

    pub fn is_marked_for_apply(&self, url: &str) -> bool {
        self.to_apply.contains(url)
    }

    pub fn urls(&self, action: BatchAction) -> Vec<String> {
        self.set(action).iter().cloned().collect()
    }

    pub fn count(&self, action: BatchAction) -> usize {
        self.set(action).len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_apply.is_empty()
    }

    fn set(&self, action: BatchAction) -> &BTreeSet<String> {
        match action {
            BatchAction::Remove => &self.to_remove,
            BatchAction::Apply => &self.to_apply,
        }
    }

    fn set_mut(&mut self, action: BatchAction) -> &mut BTreeSet<String> {
        match action {
            BatchAction::Remove => &mut self.to_remove,
            BatchAction::Apply => &mut self.to_apply,
        }
    }

    fn retain_present(&mut self, jobs: &[Job]) {
        let present: BTreeSet<&str> = jobs.iter().filter_map(Job::selection_key).collect();
        self.to_remove.retain(|url| present.contains(url.as_str()));
        self.to_apply.retain(|url| present.contains(url.as_str()));
    }
}

/// View preferences that survive restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesSnapshot {
    pub filter: FilterState,
    pub sort: SortState,
    pub show_ignored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    jobs: Vec<Job>,
    pending_filter: FilterState,
    applied_filter: FilterState,
    sort: SortState,
    show_ignored: bool,
    selection: Selection,
    logged_in: bool,
    user_email: Option<String>,
    busy: Option<Operation>,
    batch: BatchPhase,
    debounce_generation: u64,
    debounce_delay: Duration,
    notices: VecDeque<Notice>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce(debounce_delay: Duration) -> Self {
        Self {
            jobs: Vec::new(),
            pending_filter: FilterState::default(),
            applied_filter: FilterState::default(),
            sort: SortState::default(),
            show_ignored: true,
            selection: Selection::default(),
            logged_in: false,
            user_email: None,
            busy: None,
            batch: BatchPhase::Idle,
            debounce_generation: 0,
            debounce_delay,
            notices: VecDeque::new(),
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self.visible_jobs();
        let table = TableBuilder::new()
            .columns(default_columns())
            .build(&rows, &self.selection, &self.sort);
        AppViewModel {
            visible_count: rows.len(),
            job_count: self.jobs.len(),
            table,
            filter: self.pending_filter.clone(),
            sort: self.sort,
            show_ignored: self.show_ignored,
            logged_in: self.logged_in,
            user_email: self.user_email.clone(),
            busy: self.busy,
            batch: self.batch.clone(),
            selected_for_removal: self.selection.count(BatchAction::Remove),
            selected_for_apply: self.selection.count(BatchAction::Apply),
            dirty: self.dirty,
        }
    }

    /// Filtered and sorted rows, derived on every call.
    pub fn visible_jobs(&self) -> Vec<&Job> {
        compute_view(
            &self.jobs,
            &self.applied_filter,
            &self.sort,
            self.show_ignored,
        )
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn filter(&self) -> &FilterState {
        &self.applied_filter
    }

    pub fn pending_filter(&self) -> &FilterState {
        &self.pending_filter
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn busy(&self) -> Option<Operation> {
        self.busy
    }

    pub fn batch_phase(&self) -> &BatchPhase {
        &self.batch
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debounce_delay
    }

    pub fn debounce_generation(&self) -> u64 {
        self.debounce_generation
    }

    pub fn preferences_snapshot(&self) -> PreferencesSnapshot {
        PreferencesSnapshot {
            filter: self.pending_filter.clone(),
            sort: self.sort,
            show_ignored: self.show_ignored,
        }
    }

    /// Returns and clears the render flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn replace_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.selection.retain_present(&self.jobs);
        self.mark_dirty();
    }

    pub(crate) fn set_pending_filter(&mut self, field: FilterField, value: String) -> u64 {
        self.pending_filter.set(field, value);
        self.debounce_generation += 1;
        self.debounce_generation
    }

    /// Applies the typed filter if `generation` is the latest scheduled one.
    pub(crate) fn apply_pending_filter(&mut self, generation: u64) -> bool {
        if generation != self.debounce_generation {
            return false;
        }
        if self.applied_filter != self.pending_filter {
            self.applied_filter = self.pending_filter.clone();
            self.mark_dirty();
        }
        true
    }

    pub(crate) fn clear_filters(&mut self) {
        self.pending_filter = FilterState::default();
        self.applied_filter = FilterState::default();
        // Invalidate any debounce still in flight.
        self.debounce_generation += 1;
        self.mark_dirty();
    }

    pub(crate) fn toggle_sort(&mut self, column: Column) -> bool {
        let changed = self.sort.toggle(column);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub(crate) fn set_show_ignored(&mut self, show: bool) {
        if self.show_ignored != show {
            self.show_ignored = show;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_selection(&mut self, action: BatchAction, url: &str, selected: bool) {
        let known = self
            .jobs
            .iter()
            .any(|job| job.selection_key() == Some(url));
        if !known {
            return;
        }
        let set = self.selection.set_mut(action);
        let changed = if selected {
            set.insert(url.to_string())
        } else {
            set.remove(url)
        };
        if changed {
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection = Selection::default();
        self.mark_dirty();
    }

    pub(crate) fn restore_preferences(&mut self, snapshot: PreferencesSnapshot) {
        self.pending_filter = snapshot.filter.clone();
        self.applied_filter = snapshot.filter;
        self.sort = snapshot.sort;
        self.show_ignored = snapshot.show_ignored;
        self.debounce_generation += 1;
        self.mark_dirty();
    }

    /// Claims the busy slot for `operation`, or reports what holds it.
    pub(crate) fn try_begin(&mut self, operation: Operation) -> Result<(), ActionError> {
        match self.busy {
            Some(current) => Err(ActionError::Busy(current)),
            None => {
                self.busy = Some(operation);
                self.mark_dirty();
                Ok(())
            }
        }
    }

    pub(crate) fn release(&mut self) {
        if self.busy.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_batch_phase(&mut self, phase: BatchPhase) {
        self.batch = phase;
        self.mark_dirty();
    }

    /// Marks the session live. A `None` email keeps the one already known.
    pub(crate) fn log_in(&mut self, email: Option<String>) {
        self.logged_in = true;
        if email.is_some() {
            self.user_email = email;
        }
        self.mark_dirty();
    }

    /// Drops everything tied to the previous session.
    pub(crate) fn log_out(&mut self) {
        self.logged_in = false;
        self.user_email = None;
        self.jobs.clear();
        self.selection = Selection::default();
        self.pending_filter = FilterState::default();
        self.applied_filter = FilterState::default();
        self.debounce_generation += 1;
        self.mark_dirty();
    }

    pub(crate) fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push_back(Notice {
            level,
            message: message.into(),
            error: None,
        });
        self.mark_dirty();
    }

    pub(crate) fn notify_error(&mut self, error: ActionError) {
        let level = match error {
            ActionError::Validation(_) | ActionError::NoSelection | ActionError::Busy(_) => {
                NoticeLevel::Warning
            }
            ActionError::Submission(_) | ActionError::Network(_) => NoticeLevel::Error,
        };
        self.notices.push_back(Notice {
            level,
            message: error.to_string(),
            error: Some(error),
        });
        self.mark_dirty();
    }
}
