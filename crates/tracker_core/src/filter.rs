use chrono::NaiveDate;

use crate::salary::{parse_salary, parse_threshold};
use crate::Job;

/// A user-editable filter input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Title,
    Company,
    Location,
    Status,
    Salary,
    DateFrom,
    DateTo,
}

impl FilterField {
    pub const ALL: [FilterField; 7] = [
        FilterField::Title,
        FilterField::Company,
        FilterField::Location,
        FilterField::Status,
        FilterField::Salary,
        FilterField::DateFrom,
        FilterField::DateTo,
    ];

    /// Parses the short names used by filter inputs (`title`, `date-from`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "title" => Some(FilterField::Title),
            "company" => Some(FilterField::Company),
            "location" => Some(FilterField::Location),
            "status" => Some(FilterField::Status),
            "salary" => Some(FilterField::Salary),
            "date-from" | "datefrom" | "from" => Some(FilterField::DateFrom),
            "date-to" | "dateto" | "to" => Some(FilterField::DateTo),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Company => "company",
            FilterField::Location => "location",
            FilterField::Status => "status",
            FilterField::Salary => "salary",
            FilterField::DateFrom => "date-from",
            FilterField::DateTo => "date-to",
        }
    }
}

/// Per-field constraints. An empty string means "no constraint".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub title: String,
    pub company: String,
    pub location: String,
    pub status: String,
    pub salary: String,
    pub date_from: String,
    pub date_to: String,
}

impl FilterState {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Title => &self.title,
            FilterField::Company => &self.company,
            FilterField::Location => &self.location,
            FilterField::Status => &self.status,
            FilterField::Salary => &self.salary,
            FilterField::DateFrom => &self.date_from,
            FilterField::DateTo => &self.date_to,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = match field {
            FilterField::Title => &mut self.title,
            FilterField::Company => &mut self.company,
            FilterField::Location => &mut self.location,
            FilterField::Status => &mut self.status,
            FilterField::Salary => &mut self.salary,
            FilterField::DateFrom => &mut self.date_from,
            FilterField::DateTo => &mut self.date_to,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }

    /// Whether `job` satisfies every non-empty constraint.
    pub fn matches(&self, job: &Job) -> bool {
        contains_ci(job.title.as_deref(), &self.title)
            && contains_ci(job.company.as_deref(), &self.company)
            && contains_ci(job.location.as_deref(), &self.location)
            && self.status_matches(job)
            && self.salary_matches(job)
            && self.date_matches(job)
    }

    fn status_matches(&self, job: &Job) -> bool {
        if self.status.is_empty() {
            return true;
        }
        job.status
            .as_ref()
            .is_some_and(|status| status.as_str() == self.status)
    }

    fn salary_matches(&self, job: &Job) -> bool {
        // An unreadable threshold constrains nothing.
        let Some(minimum) = parse_threshold(&self.salary) else {
            return true;
        };
        job.salary
            .as_deref()
            .and_then(parse_salary)
            .is_some_and(|range| range.max >= minimum)
    }

    fn date_matches(&self, job: &Job) -> bool {
        let from = parse_date(&self.date_from);
        let to = parse_date(&self.date_to);
        if from.is_none() && to.is_none() {
            return true;
        }
        let Some(found) = job.date_found.as_deref().and_then(parse_date) else {
            return false;
        };
        from.map_or(true, |from| found >= from) && to.map_or(true, |to| found <= to)
    }
}

fn contains_ci(value: Option<&str>, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    value.is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
}

/// Calendar date of a `YYYY-MM-DD` string or an ISO datetime.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
