use std::path::PathBuf;
use std::time::Duration;

use crate::{Credentials, FetchOrigin, SearchRequest};

/// Side effects requested by `update`. The engine executes them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitSearch(SearchRequest),
    FetchJobs { origin: FetchOrigin },
    RemoveJobs { urls: Vec<String> },
    ApplyJobs { urls: Vec<String> },
    Login(Credentials),
    Register(Credentials),
    Logout,
    CheckSession,
    UploadResume { path: PathBuf },
    /// Deliver `Msg::DebounceElapsed { generation }` after `delay`,
    /// replacing any previously scheduled recompute.
    ScheduleRecompute { generation: u64, delay: Duration },
}

impl Effect {
    /// Whether executing this effect talks to the backend.
    pub fn is_network(&self) -> bool {
        !matches!(self, Effect::ScheduleRecompute { .. })
    }
}
