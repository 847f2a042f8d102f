use std::cmp::Ordering;

use crate::Job;

/// A column of the jobs table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Title,
    Company,
    Location,
    Salary,
    Url,
    Status,
    DateFound,
    Score,
    Remove,
    Apply,
}

impl Column {
    /// Parses a column name as typed by the user (`title`, `date`, `status`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" | "jobtitle" => Some(Column::Title),
            "company" => Some(Column::Company),
            "location" => Some(Column::Location),
            "salary" => Some(Column::Salary),
            "url" | "link" => Some(Column::Url),
            "status" => Some(Column::Status),
            "date" | "datefound" => Some(Column::DateFound),
            "score" | "jobscore" => Some(Column::Score),
            "remove" => Some(Column::Remove),
            "apply" => Some(Column::Apply),
            _ => None,
        }
    }

    /// Sort key for data columns; selection columns have none.
    pub fn sort_key(self) -> Option<SortKey> {
        match self {
            Column::Title => Some(SortKey::Title),
            Column::Company => Some(SortKey::Company),
            Column::Location => Some(SortKey::Location),
            Column::Salary => Some(SortKey::Salary),
            Column::Url => Some(SortKey::Url),
            Column::Status => Some(SortKey::Status),
            Column::DateFound => Some(SortKey::DateFound),
            Column::Score => Some(SortKey::Score),
            Column::Remove | Column::Apply => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Title,
    Company,
    Location,
    Salary,
    Url,
    Status,
    DateFound,
    Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// Applies a header click. Returns `false` for non-sortable columns.
    pub fn toggle(&mut self, column: Column) -> bool {
        let Some(key) = column.sort_key() else {
            return false;
        };
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Ascending;
        }
        true
    }

    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        let Some(key) = self.key else {
            return Ordering::Equal;
        };
        let ordering = match key {
            SortKey::Status => status_rank(a).cmp(&status_rank(b)),
            _ => sort_text(a, key).cmp(sort_text(b, key)),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

fn status_rank(job: &Job) -> u8 {
    job.status
        .as_ref()
        .map_or(crate::job::UNRANKED_STATUS, |status| status.rank())
}

fn sort_text(job: &Job, key: SortKey) -> &str {
    let value = match key {
        SortKey::Title => job.title.as_deref(),
        SortKey::Company => job.company.as_deref(),
        SortKey::Location => job.location.as_deref(),
        SortKey::Salary => job.salary.as_deref(),
        SortKey::Url => job.url.as_deref(),
        SortKey::Status => job.status.as_ref().map(|status| status.as_str()),
        SortKey::DateFound => job.date_found.as_deref(),
        SortKey::Score => job.score.as_deref(),
    };
    value.unwrap_or("")
}
