use crate::{BatchPhase, FilterState, Operation, SortState, TableView};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub table: TableView,
    /// Size of the whole collection.
    pub job_count: usize,
    /// Rows left after filtering.
    pub visible_count: usize,
    /// Filter inputs as typed, including not-yet-applied edits.
    pub filter: FilterState,
    pub sort: SortState,
    pub show_ignored: bool,
    pub logged_in: bool,
    pub user_email: Option<String>,
    /// Operation holding the UI busy, if any. Triggers should be disabled.
    pub busy: Option<Operation>,
    pub batch: BatchPhase,
    pub selected_for_removal: usize,
    pub selected_for_apply: usize,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }
}
