use std::fmt;

/// A user-triggered network operation. Only one may be outstanding at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Search,
    Refresh,
    Batch,
    SessionCheck,
    Login,
    Register,
    Logout,
    ResumeUpload,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Search => "search",
            Operation::Refresh => "refresh",
            Operation::Batch => "batch update",
            Operation::SessionCheck => "session check",
            Operation::Login => "login",
            Operation::Register => "registration",
            Operation::Logout => "logout",
            Operation::ResumeUpload => "resume upload",
        };
        f.write_str(label)
    }
}

/// Why a backend call did not succeed, as seen by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "HTTP {code}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// User-visible failure of an action. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),
    #[error("submission failed: {0}")]
    Submission(RequestFailure),
    #[error("request failed: {0}")]
    Network(RequestFailure),
    #[error("no jobs selected")]
    NoSelection,
    #[error("a {0} is already in progress")]
    Busy(Operation),
}
