use std::fmt;

/// Rank given to statuses outside the known table.
pub const UNRANKED_STATUS: u8 = 99;

/// Application status of a tracked job.
///
/// The backend treats this as an open string enum, so unknown values are kept
/// verbatim in `Other` and sort after every known status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum JobStatus {
    #[default]
    New,
    Applied,
    Interview,
    Rejected,
    Ignored,
    Other(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "New" => JobStatus::New,
            "Applied" => JobStatus::Applied,
            "Interview" => JobStatus::Interview,
            "Rejected" => JobStatus::Rejected,
            "Ignored" => JobStatus::Ignored,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::New => "New",
            JobStatus::Applied => "Applied",
            JobStatus::Interview => "Interview",
            JobStatus::Rejected => "Rejected",
            JobStatus::Ignored => "Ignored",
            JobStatus::Other(raw) => raw,
        }
    }

    /// Position in the fixed status ordering used for sorting.
    pub fn rank(&self) -> u8 {
        match self {
            JobStatus::New => 0,
            JobStatus::Applied => 1,
            JobStatus::Interview => 2,
            JobStatus::Rejected => 3,
            JobStatus::Ignored => 4,
            JobStatus::Other(_) => UNRANKED_STATUS,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked job as returned by the backend.
///
/// Every field is optional: the payload is owned by the backend and the
/// dashboard must render whatever it is given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Job {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub url: Option<String>,
    pub status: Option<JobStatus>,
    pub date_found: Option<String>,
    pub score: Option<String>,
}

impl Job {
    /// URL usable as a selection key. Blank URLs do not count.
    pub fn selection_key(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn is_new(&self) -> bool {
        matches!(self.status, Some(JobStatus::New))
    }
}
