use crate::filter::parse_date;
use crate::{Column, Job, JobStatus, Selection, SortDirection, SortState};

/// Placeholder shown when no row survives filtering.
pub const EMPTY_TABLE_MESSAGE: &str = "No job applications found.";

pub type CellFormatter = fn(&Job) -> String;

/// Declarative description of one table column.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub column: Column,
    pub label: &'static str,
    pub formatter: Option<CellFormatter>,
}

impl ColumnSpec {
    pub fn new(column: Column, label: &'static str) -> Self {
        Self {
            column,
            label,
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    fn render(&self, job: &Job, selection: &Selection) -> String {
        if let Some(formatter) = self.formatter {
            return formatter(job);
        }
        let raw = match self.column {
            Column::Title => job.title.as_deref(),
            Column::Company => job.company.as_deref(),
            Column::Location => job.location.as_deref(),
            Column::Salary => job.salary.as_deref(),
            Column::Url => job.url.as_deref(),
            Column::Status => job.status.as_ref().map(JobStatus::as_str),
            Column::DateFound => job.date_found.as_deref(),
            Column::Score => job.score.as_deref(),
            Column::Remove => return checkbox(job, |url| selection.is_marked_for_removal(url)),
            Column::Apply => return checkbox(job, |url| selection.is_marked_for_apply(url)),
        };
        raw.unwrap_or_default().to_string()
    }
}

fn checkbox(job: &Job, is_checked: impl Fn(&str) -> bool) -> String {
    match job.selection_key() {
        Some(url) if is_checked(url) => "[x]".to_string(),
        Some(_) => "[ ]".to_string(),
        None => String::new(),
    }
}

/// Shortens an ISO timestamp to a `month/day/year` date.
pub fn format_date_found(job: &Job) -> String {
    match job.date_found.as_deref() {
        Some(raw) => parse_date(raw)
            .map(|date| date.format("%-m/%-d/%Y").to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => String::new(),
    }
}

fn format_url(job: &Job) -> String {
    job.selection_key().map(str::to_string).unwrap_or_default()
}

/// The column set of the jobs dashboard.
pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new(Column::Title, "Job Title"),
        ColumnSpec::new(Column::Company, "Company"),
        ColumnSpec::new(Column::Location, "Location"),
        ColumnSpec::new(Column::Salary, "Salary"),
        ColumnSpec::new(Column::Url, "Job URL").with_formatter(format_url),
        ColumnSpec::new(Column::Status, "Job Status"),
        ColumnSpec::new(Column::DateFound, "Date Found").with_formatter(format_date_found),
        ColumnSpec::new(Column::Remove, "Remove"),
        ColumnSpec::new(Column::Apply, "Apply"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub column: Column,
    pub label: String,
    pub sortable: bool,
    pub sorted: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub url: Option<String>,
    pub status: Option<JobStatus>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    /// Set when there are no rows to show.
    pub empty_message: Option<String>,
}

/// Builds a `TableView` from the computed rows and a column list.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    columns: Vec<ColumnSpec>,
    empty_message: String,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            empty_message: EMPTY_TABLE_MESSAGE.to_string(),
        }
    }

    pub fn column(mut self, spec: ColumnSpec) -> Self {
        self.columns.push(spec);
        self
    }

    pub fn columns(mut self, specs: impl IntoIterator<Item = ColumnSpec>) -> Self {
        self.columns.extend(specs);
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn build(&self, rows: &[&Job], selection: &Selection, sort: &SortState) -> TableView {
        let headers = self
            .columns
            .iter()
            .map(|spec| {
                let key = spec.column.sort_key();
                HeaderView {
                    column: spec.column,
                    label: spec.label.to_string(),
                    sortable: key.is_some(),
                    sorted: (key.is_some() && key == sort.key).then_some(sort.direction),
                }
            })
            .collect();

        let rows: Vec<RowView> = rows
            .iter()
            .map(|job| RowView {
                url: job.selection_key().map(str::to_string),
                status: job.status.clone(),
                cells: self
                    .columns
                    .iter()
                    .map(|spec| spec.render(job, selection))
                    .collect(),
            })
            .collect();

        let empty_message = rows.is_empty().then(|| self.empty_message.clone());
        TableView {
            headers,
            rows,
            empty_message,
        }
    }
}
