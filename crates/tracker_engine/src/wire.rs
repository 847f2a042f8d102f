//! JSON shapes exchanged with the tracker backend.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracker_core::{Credentials, Job, JobStatus, SearchRequest};

/// One job as the backend serializes it (PascalCase keys).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "JobTitle", default, deserialize_with = "lenient_string")]
    pub job_title: Option<String>,
    #[serde(rename = "Company", default, deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(rename = "Salary", default, deserialize_with = "lenient_string")]
    pub salary: Option<String>,
    #[serde(rename = "URL", default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(rename = "DateFound", default, deserialize_with = "lenient_string")]
    pub date_found: Option<String>,
    #[serde(rename = "JobScore", default, deserialize_with = "lenient_string")]
    pub job_score: Option<String>,
}

impl From<JobRecord> for Job {
    fn from(record: JobRecord) -> Self {
        Job {
            title: record.job_title,
            company: record.company,
            location: record.location,
            salary: record.salary,
            url: record.url,
            status: record.status.as_deref().map(JobStatus::parse),
            date_found: record.date_found,
            score: record.job_score,
        }
    }
}

/// `{jobs: [...]}`; a missing list means no jobs.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct JobsEnvelope {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionStatus {
    #[serde(default)]
    pub logged_in: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthResponse {
    #[serde(default)]
    pub user: Option<Value>,
}

impl AuthResponse {
    /// The user's email, whether `user` is an object or a bare string.
    pub fn email(&self) -> Option<String> {
        match self.user.as_ref()? {
            Value::String(email) => Some(email.clone()),
            Value::Object(fields) => fields
                .get("email")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }
}

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchPayload<'a> {
    pub date_posted: &'a str,
    pub experience_level: &'a str,
    pub job_title: &'a str,
    pub location: &'a str,
}

impl<'a> From<&'a SearchRequest> for SearchPayload<'a> {
    fn from(request: &'a SearchRequest) -> Self {
        Self {
            date_posted: &request.date_posted,
            experience_level: &request.experience_level,
            job_title: &request.job_title,
            location: &request.location,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UrlBatch<'a> {
    #[serde(rename = "jobURLs")]
    pub job_urls: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct CredentialsPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for CredentialsPayload<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            email: &credentials.email,
            password: &credentials.password,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_record_accepts_numeric_score_and_missing_fields() {
        let json = r#"{"JobTitle":"Rust Dev","URL":"https://x/1","Status":"Interview","JobScore":87}"#;
        let record: JobRecord = serde_json::from_str(json).unwrap();
        let job = Job::from(record);
        assert_eq!(job.title.as_deref(), Some("Rust Dev"));
        assert_eq!(job.status, Some(JobStatus::Interview));
        assert_eq!(job.score.as_deref(), Some("87"));
        assert_eq!(job.company, None);
    }

    #[test]
    fn auth_response_email_from_object_or_string() {
        let body: AuthResponse =
            serde_json::from_str(r#"{"user":{"email":"me@example.com","id":3}}"#).unwrap();
        assert_eq!(body.email().as_deref(), Some("me@example.com"));
        let body: AuthResponse = serde_json::from_str(r#"{"user":"me@example.com"}"#).unwrap();
        assert_eq!(body.email().as_deref(), Some("me@example.com"));
        let body: AuthResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.email(), None);
    }

    #[test]
    fn search_payload_uses_camel_case_keys() {
        let request = SearchRequest {
            date_posted: "Past Week".to_string(),
            experience_level: "Entry Level".to_string(),
            job_title: "Rust".to_string(),
            location: String::new(),
        };
        let json = serde_json::to_value(SearchPayload::from(&request)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "datePosted": "Past Week",
                "experienceLevel": "Entry Level",
                "jobTitle": "Rust",
                "location": ""
            })
        );
    }
}
