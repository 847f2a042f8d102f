use std::path::PathBuf;

use crate::{
    AuthMode, BatchAction, Column, Credentials, FetchOrigin, FilterField, Job, PreferencesSnapshot,
    RequestFailure, SearchCriteria,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited one filter input.
    FilterChanged { field: FilterField, value: String },
    /// The debounce timer for `generation` fired.
    DebounceElapsed { generation: u64 },
    /// User clicked a column header.
    SortClicked(Column),
    /// User clicked "Clear filters".
    ClearFilters,
    /// User toggled visibility of ignored jobs.
    ShowIgnoredToggled(bool),
    /// User ticked or unticked a Remove/Apply checkbox.
    SelectionToggled {
        action: BatchAction,
        url: String,
        selected: bool,
    },
    /// Restore filter/sort preferences from persisted state.
    RestorePreferences(PreferencesSnapshot),
    /// User submitted the search form.
    SearchSubmitted(SearchCriteria),
    /// User asked for the current job list.
    RefreshClicked { silent: bool },
    /// User clicked "Process selected".
    BatchClicked,
    /// Ask the backend whether the session cookie is still valid.
    SessionCheckRequested,
    LoginSubmitted(Credentials),
    RegisterSubmitted(Credentials),
    LogoutClicked,
    /// User picked a résumé file to upload.
    ResumeSelected(PathBuf),

    /// Backend answered `/add_job_request`.
    SearchCompleted(Result<Vec<Job>, RequestFailure>),
    /// Backend answered `/refresh_jobs`.
    JobsLoaded {
        origin: FetchOrigin,
        result: Result<Vec<Job>, RequestFailure>,
    },
    /// Backend answered `/remove_jobs` or `/apply_jobs`.
    BatchStepCompleted {
        action: BatchAction,
        result: Result<(), RequestFailure>,
    },
    /// Backend answered `/login` or `/register` with the user's email, if given.
    AuthCompleted {
        mode: AuthMode,
        result: Result<Option<String>, RequestFailure>,
    },
    LogoutCompleted(Result<(), RequestFailure>),
    SessionChecked(Result<bool, RequestFailure>),
    ResumeUploaded(Result<(), RequestFailure>),

    /// Fallback for placeholder wiring.
    NoOp,
}
