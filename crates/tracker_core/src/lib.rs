//! Job tracker core: pure state machine, view pipeline and table helpers.
mod effect;
mod error;
mod filter;
mod job;
mod msg;
mod pipeline;
mod request;
mod salary;
mod sort;
mod state;
mod table;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{ActionError, Operation, RequestFailure};
pub use filter::{parse_date, FilterField, FilterState};
pub use job::{Job, JobStatus, UNRANKED_STATUS};
pub use msg::Msg;
pub use pipeline::compute_view;
pub use request::{
    AuthMode, BatchAction, Credentials, FetchOrigin, SearchCriteria, SearchRequest,
};
pub use salary::{parse_salary, parse_threshold, SalaryRange, HOURS_PER_YEAR};
pub use sort::{Column, SortDirection, SortKey, SortState};
pub use state::{
    AppState, BatchPhase, Notice, NoticeLevel, PreferencesSnapshot, Selection, DEFAULT_DEBOUNCE,
};
pub use table::{
    default_columns, format_date_found, CellFormatter, ColumnSpec, HeaderView, RowView,
    TableBuilder, TableView, EMPTY_TABLE_MESSAGE,
};
pub use update::update;
pub use view_model::AppViewModel;
