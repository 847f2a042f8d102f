use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracker_core::{Credentials, Job, SearchRequest};
use tracker_logging::{tracker_debug, tracker_info, tracker_warn};
use url::Url;

use crate::wire::{
    AuthResponse, CredentialsPayload, ErrorBody, JobsEnvelope, SearchPayload, SessionStatus,
    UrlBatch,
};
use crate::{BackendError, FailureKind};

/// Multipart field name the résumé endpoint expects.
pub const RESUME_FIELD: &str = "resumeFile";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_resume_bytes: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_resume_bytes: 10 * 1024 * 1024,
        }
    }
}

/// The tracker backend's HTTP surface.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn submit_search(&self, request: &SearchRequest) -> Result<Vec<Job>, BackendError>;
    async fn fetch_jobs(&self) -> Result<Vec<Job>, BackendError>;
    async fn remove_jobs(&self, urls: &[String]) -> Result<(), BackendError>;
    async fn apply_jobs(&self, urls: &[String]) -> Result<(), BackendError>;
    /// Returns the user's email when the backend reports one.
    async fn login(&self, credentials: &Credentials) -> Result<Option<String>, BackendError>;
    async fn register(&self, credentials: &Credentials) -> Result<Option<String>, BackendError>;
    async fn logout(&self) -> Result<(), BackendError>;
    async fn session_status(&self) -> Result<bool, BackendError>;
    /// Uploads a résumé and returns the parsed-résumé JSON as given.
    async fn upload_resume(&self, path: &Path) -> Result<serde_json::Value, BackendError>;
}

/// `Backend` over reqwest. Keeps a cookie store so the login session sticks.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base_url: Url,
    settings: BackendSettings,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let mut base = settings.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            settings,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get(&self, path: &str) -> Result<Response, BackendError> {
        let url = self.endpoint(path)?;
        tracker_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(response).await
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, BackendError> {
        let url = self.endpoint(path)?;
        tracker_debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(response).await
    }

    async fn authenticate(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<Option<String>, BackendError> {
        let response = self
            .post_json(path, &CredentialsPayload::from(credentials))
            .await?;
        let body: AuthResponse = decode_json(response).await?;
        Ok(body.email())
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn submit_search(&self, request: &SearchRequest) -> Result<Vec<Job>, BackendError> {
        tracker_info!(
            "Submitting search title={:?} experience={:?} posted={:?}",
            request.job_title,
            request.experience_level,
            request.date_posted
        );
        let response = self
            .post_json("/add_job_request", &SearchPayload::from(request))
            .await?;
        let envelope: JobsEnvelope = decode_json(response).await?;
        Ok(envelope.jobs.into_iter().map(Job::from).collect())
    }

    async fn fetch_jobs(&self) -> Result<Vec<Job>, BackendError> {
        let response = self.get("/refresh_jobs").await?;
        let envelope: JobsEnvelope = decode_json(response).await?;
        tracker_debug!("Fetched {} jobs", envelope.jobs.len());
        Ok(envelope.jobs.into_iter().map(Job::from).collect())
    }

    async fn remove_jobs(&self, urls: &[String]) -> Result<(), BackendError> {
        tracker_info!("Removing {} job(s)", urls.len());
        self.post_json("/remove_jobs", &UrlBatch { job_urls: urls })
            .await
            .map(drop)
    }

    async fn apply_jobs(&self, urls: &[String]) -> Result<(), BackendError> {
        tracker_info!("Marking {} job(s) as applied", urls.len());
        self.post_json("/apply_jobs", &UrlBatch { job_urls: urls })
            .await
            .map(drop)
    }

    async fn login(&self, credentials: &Credentials) -> Result<Option<String>, BackendError> {
        self.authenticate("/login", credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<Option<String>, BackendError> {
        self.authenticate("/register", credentials).await
    }

    async fn logout(&self) -> Result<(), BackendError> {
        let url = self.endpoint("/logout")?;
        tracker_debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(response).await.map(drop)
    }

    async fn session_status(&self) -> Result<bool, BackendError> {
        let response = self.get("/session_status").await?;
        let status: SessionStatus = decode_json(response).await?;
        Ok(status.logged_in)
    }

    async fn upload_resume(&self, path: &Path) -> Result<serde_json::Value, BackendError> {
        let io_error =
            |err: std::io::Error| BackendError::new(FailureKind::Io, format!("{}: {err}", path.display()));
        let max_bytes = self.settings.max_resume_bytes;

        // Reject on the declared size before reading anything into memory.
        let declared = tokio::fs::metadata(path).await.map_err(io_error)?.len();
        if declared > max_bytes {
            return Err(too_large(max_bytes, declared));
        }
        let bytes = tokio::fs::read(path).await.map_err(io_error)?;
        let size = bytes.len() as u64;
        if size > max_bytes {
            return Err(too_large(max_bytes, size));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime_for(path))
            .map_err(|err| BackendError::new(FailureKind::Decode, err.to_string()))?;
        let form = Form::new().part(RESUME_FIELD, part);

        let url = self.endpoint("/resume_handler")?;
        tracker_info!("Uploading resume {} ({} bytes)", file_name, size);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response).await?;
        decode_json(response).await
    }
}

fn too_large(max_bytes: u64, actual: u64) -> BackendError {
    BackendError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "resume file too large",
    )
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Turns non-2xx responses into `HttpStatus` errors, preferring the backend's message.
async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .unwrap_or_else(|| status.to_string());
    tracker_warn!("Backend returned {}: {}", status, detail);
    Err(BackendError::new(
        FailureKind::HttpStatus(status.as_u16()),
        detail,
    ))
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let body = response.text().await.map_err(map_reqwest_error)?;
    serde_json::from_str(&body).map_err(|err| BackendError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(FailureKind::Decode, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
