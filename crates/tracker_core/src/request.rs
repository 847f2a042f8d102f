use crate::ActionError;

/// Raw search form input, as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub date_posted: String,
    pub experience_level: String,
    pub job_title: String,
    pub location: String,
}

/// Validated search payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub date_posted: String,
    pub experience_level: String,
    pub job_title: String,
    pub location: String,
}

impl SearchCriteria {
    /// Trims every field and rejects missing required ones.
    pub fn validate(&self) -> Result<SearchRequest, ActionError> {
        let date_posted = self.date_posted.trim();
        let experience_level = self.experience_level.trim();
        let job_title = self.job_title.trim();

        let mut missing = Vec::new();
        if date_posted.is_empty() {
            missing.push("date posted");
        }
        if experience_level.is_empty() {
            missing.push("experience level");
        }
        if job_title.is_empty() {
            missing.push("job title");
        }
        if !missing.is_empty() {
            return Err(ActionError::Validation(format!(
                "All fields are required (missing: {}).",
                missing.join(", ")
            )));
        }

        Ok(SearchRequest {
            date_posted: date_posted.to_string(),
            experience_level: experience_level.to_string(),
            job_title: job_title.to_string(),
            location: self.location.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<Credentials, ActionError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(ActionError::Validation(
                "Email and password are required.".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(ActionError::Validation(
                "Please enter a valid email address.".to_string(),
            ));
        }
        Ok(Credentials::new(email, self.password.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMode {
    Login,
    Register,
}

/// The two batch actions, in the order they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchAction {
    Remove,
    Apply,
}

/// Why a job list fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Explicit refresh; `silent` suppresses the success notice only.
    Refresh { silent: bool },
    AfterBatch,
    AfterLogin,
    SessionRestore,
}
