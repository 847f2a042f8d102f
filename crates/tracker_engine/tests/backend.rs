use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tracker_core::{Credentials, JobStatus, RequestFailure, SearchCriteria};
use tracker_engine::{Backend, BackendSettings, FailureKind, ReqwestBackend, RESUME_FIELD};
use wiremock::matchers::{
    body_json, body_string_contains, header, header_regex, method, path,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

fn backend_for(server: &MockServer) -> ReqwestBackend {
    INIT.call_once(tracker_logging::initialize_for_tests);
    ReqwestBackend::new(BackendSettings {
        base_url: server.uri(),
        ..BackendSettings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn fetch_jobs_decodes_backend_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/refresh_jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [
                {
                    "JobTitle": "Rust Engineer",
                    "Company": "Ferrous",
                    "Location": "Remote",
                    "Salary": "$120k - $150k",
                    "URL": "https://jobs.example/1",
                    "Status": "New",
                    "DateFound": "2024-03-09T10:00:00",
                    "JobScore": 91
                },
                { "JobTitle": "Sparse", "Status": "Ghosted" }
            ]
        })))
        .mount(&server)
        .await;

    let jobs = backend_for(&server).fetch_jobs().await.unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].company.as_deref(), Some("Ferrous"));
    assert_eq!(jobs[0].status, Some(JobStatus::New));
    assert_eq!(jobs[0].score.as_deref(), Some("91"));
    assert_eq!(jobs[1].url, None);
    assert_eq!(jobs[1].status, Some(JobStatus::Other("Ghosted".to_string())));
}

#[tokio::test]
async fn missing_jobs_list_means_no_jobs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/refresh_jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    assert!(backend_for(&server).fetch_jobs().await.unwrap().is_empty());
}

#[tokio::test]
async fn error_status_carries_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/add_job_request"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "scraper offline"})),
        )
        .mount(&server)
        .await;

    let request = SearchCriteria {
        date_posted: "Past Week".into(),
        experience_level: "Mid-Senior".into(),
        job_title: "Rust".into(),
        location: "Berlin".into(),
    }
    .validate()
    .unwrap();

    let err = backend_for(&server)
        .submit_search(&request)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, "scraper offline");
    assert_eq!(
        RequestFailure::from(err),
        RequestFailure::with_status(500, "scraper offline")
    );
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/refresh_jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"jobs": []})),
        )
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(BackendSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..BackendSettings::default()
    })
    .unwrap();

    let err = backend.fetch_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn search_posts_camel_case_criteria() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/add_job_request"))
        .and(body_json(json!({
            "datePosted": "Past 24 hours",
            "experienceLevel": "Entry level",
            "jobTitle": "Data Analyst",
            "location": "Austin, TX"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{ "JobTitle": "Data Analyst", "URL": "https://jobs.example/9" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchCriteria {
        date_posted: "Past 24 hours".into(),
        experience_level: "Entry level".into(),
        job_title: "  Data Analyst ".into(),
        location: "Austin, TX".into(),
    }
    .validate()
    .unwrap();

    let jobs = backend_for(&server).submit_search(&request).await.unwrap();
    assert_eq!(jobs.len(), 1);
}

#[tokio::test]
async fn batch_endpoints_send_job_urls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/remove_jobs"))
        .and(body_json(json!({"jobURLs": ["https://a", "https://b"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/apply_jobs"))
        .and(body_json(json!({"jobURLs": ["https://c"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    backend
        .remove_jobs(&["https://a".to_string(), "https://b".to_string()])
        .await
        .unwrap();
    backend.apply_jobs(&["https://c".to_string()]).await.unwrap();
}

#[tokio::test]
async fn login_cookie_is_sent_on_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "me@example.com", "password": "hunter2"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "session=abc123; Path=/")
                .set_body_json(json!({"user": {"email": "me@example.com"}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/session_status"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"logged_in": true})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/session_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"logged_in": false})))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    assert!(!backend.session_status().await.unwrap());

    let email = backend
        .login(&Credentials::new("me@example.com", "hunter2"))
        .await
        .unwrap();
    assert_eq!(email.as_deref(), Some("me@example.com"));
    assert!(backend.session_status().await.unwrap());
}

#[tokio::test]
async fn rejected_login_surfaces_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .login(&Credentials::new("me@example.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(401));
    assert_eq!(err.message, "Invalid credentials");
}

#[tokio::test]
async fn resume_is_uploaded_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resume_handler"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains(RESUME_FIELD))
        .and(body_string_contains("cv.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"skills": ["rust", "sql"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("cv.pdf");
    std::fs::write(&file, b"%PDF-1.4 fake").unwrap();

    let parsed = backend_for(&server).upload_resume(&file).await.unwrap();
    assert_eq!(parsed["skills"][1], "sql");
}

#[tokio::test]
async fn oversized_resume_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resume_handler"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("big.docx");
    std::fs::write(&file, vec![b'x'; 64]).unwrap();

    let backend = ReqwestBackend::new(BackendSettings {
        base_url: server.uri(),
        max_resume_bytes: 16,
        ..BackendSettings::default()
    })
    .unwrap();
    let err = backend.upload_resume(&file).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 16,
            actual: Some(64)
        }
    );
}

#[tokio::test]
async fn missing_resume_file_is_an_io_failure() {
    let server = MockServer::start().await;
    let err = backend_for(&server)
        .upload_resume(std::path::Path::new("/definitely/not/here.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Io);
}

#[tokio::test]
async fn huge_resume_is_rejected_from_metadata_alone() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("huge.pdf");
    let declared: u64 = 4 * 1024 * 1024 * 1024;
    // Sparse on common filesystems: nothing is allocated unless read.
    std::fs::File::create(&file).unwrap().set_len(declared).unwrap();

    let backend = backend_for(&server);
    let err = tokio::time::timeout(Duration::from_secs(5), backend.upload_resume(&file))
        .await
        .expect("size check must not read the file")
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: BackendSettings::default().max_resume_bytes,
            actual: Some(declared)
        }
    );
}
