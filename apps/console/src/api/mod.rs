//! Outreach API client — the single point of entry for calls to the remote
//! outreach service.
//!
//! ARCHITECTURAL RULE: no other module may touch the network. All three
//! endpoints live here, and each action makes exactly one attempt — the
//! operator retries by re-running the action, never this module.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{Candidate, DeliveryDetail, EmailDraft, Job};

/// Create and send block on the remote model and mailer.
const ACTION_TIMEOUT: Duration = Duration::from_secs(30);
/// The health probe should answer immediately.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Payload of a successful create call.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub job_id: String,
    pub emails: Vec<EmailDraft>,
}

/// Payload of a successful send call. The service may report an explicit
/// count, a per-recipient detail list, both, or neither.
#[derive(Debug, Clone, Default)]
pub struct SendOutcome {
    pub emails_sent: Option<usize>,
    pub details: Option<Vec<DeliveryDetail>>,
}

impl SendOutcome {
    /// Derives the number of emails sent, in fixed fallback order:
    /// the explicit count if the service reported one, else the length of
    /// the detail list, else the number of drafts that were submitted.
    pub fn sent_count(&self, submitted: usize) -> usize {
        self.emails_sent
            .or_else(|| self.details.as_ref().map(|d| d.len()))
            .unwrap_or(submitted)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire shapes
// ────────────────────────────────────────────────────────────────────────────

// Every response carries a `success` flag; which other fields are present
// depends on that flag, so everything else is optional on the wire and
// checked during conversion.

#[derive(Debug, Serialize)]
struct CreatePayload<'a> {
    job: &'a Job,
    candidates: &'a [Candidate],
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    success: bool,
    job_id: Option<String>,
    emails: Option<Vec<EmailDraft>>,
    error: Option<String>,
}

impl CreateResponse {
    fn into_outcome(self) -> Result<CreateOutcome, AppError> {
        if !self.success {
            return Err(AppError::Application(error_or_unspecified(self.error)));
        }
        let job_id = self.job_id.ok_or_else(|| {
            AppError::Transport("malformed response: success without job_id".to_string())
        })?;
        let emails = self.emails.ok_or_else(|| {
            AppError::Transport("malformed response: success without emails".to_string())
        })?;
        Ok(CreateOutcome { job_id, emails })
    }
}

#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    job_id: Option<&'a str>,
    emails: &'a [EmailDraft],
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    success: bool,
    emails_sent: Option<usize>,
    details: Option<Vec<DeliveryDetail>>,
    error: Option<String>,
}

impl SendResponse {
    fn into_outcome(self) -> Result<SendOutcome, AppError> {
        if !self.success {
            return Err(AppError::Application(error_or_unspecified(self.error)));
        }
        Ok(SendOutcome {
            emails_sent: self.emails_sent,
            details: self.details,
        })
    }
}

fn error_or_unspecified(error: Option<String>) -> String {
    error.unwrap_or_else(|| "service reported failure without an error message".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The controller's view of the remote service. Production code uses
/// [`ApiClient`]; controller tests substitute a mock.
#[async_trait]
pub trait OutreachApi: Send + Sync {
    /// GET /health — returns whatever JSON the service answers with.
    async fn check_health(&self) -> Result<Value, AppError>;

    /// POST /emails/create — asks the service to draft one email per candidate.
    async fn create_drafts(
        &self,
        job: &Job,
        candidates: &[Candidate],
    ) -> Result<CreateOutcome, AppError>;

    /// POST /emails/send — asks the service to deliver the (edited) drafts.
    async fn send_emails(
        &self,
        job_id: Option<&str>,
        emails: &[EmailDraft],
    ) -> Result<SendOutcome, AppError>;
}

/// HTTP client for the outreach service. Authentication is a `code` query
/// parameter on every request.
pub struct ApiClient {
    client: Client,
    base_url: String,
    access_key: String,
}

impl ApiClient {
    pub fn new(base_url: String, access_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl OutreachApi for ApiClient {
    async fn check_health(&self) -> Result<Value, AppError> {
        debug!("GET /health");
        let response = self
            .client
            .get(self.url("/health"))
            .query(&[("code", self.access_key.as_str())])
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await?;

        Ok(response.json().await?)
    }

    async fn create_drafts(
        &self,
        job: &Job,
        candidates: &[Candidate],
    ) -> Result<CreateOutcome, AppError> {
        info!(candidates = candidates.len(), "POST /emails/create");
        let response = self
            .client
            .post(self.url("/emails/create"))
            .query(&[("code", self.access_key.as_str())])
            .timeout(ACTION_TIMEOUT)
            .json(&CreatePayload { job, candidates })
            .send()
            .await?;

        let body: CreateResponse = response.json().await?;
        body.into_outcome()
    }

    async fn send_emails(
        &self,
        job_id: Option<&str>,
        emails: &[EmailDraft],
    ) -> Result<SendOutcome, AppError> {
        info!(emails = emails.len(), "POST /emails/send");
        let response = self
            .client
            .post(self.url("/emails/send"))
            .query(&[("code", self.access_key.as_str())])
            .timeout(ACTION_TIMEOUT)
            .json(&SendPayload { job_id, emails })
            .send()
            .await?;

        let body: SendResponse = response.json().await?;
        body.into_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_response_success_deserializes() {
        let json = r#"{
            "success": true,
            "job_id": "J1",
            "emails": [
                {"email": "ada@example.com", "subject": "s", "body": "b"}
            ]
        }"#;

        let outcome = serde_json::from_str::<CreateResponse>(json)
            .unwrap()
            .into_outcome()
            .unwrap();
        assert_eq!(outcome.job_id, "J1");
        assert_eq!(outcome.emails.len(), 1);
        assert_eq!(outcome.emails[0].email, "ada@example.com");
    }

    #[test]
    fn test_create_response_failure_surfaces_error_verbatim() {
        let json = r#"{"success": false, "error": "no template"}"#;

        let err = serde_json::from_str::<CreateResponse>(json)
            .unwrap()
            .into_outcome()
            .unwrap_err();
        match err {
            AppError::Application(msg) => assert_eq!(msg, "no template"),
            other => panic!("expected application error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_response_success_without_job_id_is_transport_error() {
        let json = r#"{"success": true, "emails": []}"#;

        let err = serde_json::from_str::<CreateResponse>(json)
            .unwrap()
            .into_outcome()
            .unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }

    #[test]
    fn test_send_response_failure_without_message_gets_placeholder() {
        let json = r#"{"success": false}"#;

        let err = serde_json::from_str::<SendResponse>(json)
            .unwrap()
            .into_outcome()
            .unwrap_err();
        match err {
            AppError::Application(msg) => assert!(!msg.is_empty()),
            other => panic!("expected application error, got {other:?}"),
        }
    }

    #[test]
    fn test_sent_count_prefers_explicit_field() {
        let json = r#"{"success": true, "emails_sent": 3, "details": [{}, {}]}"#;

        let outcome = serde_json::from_str::<SendResponse>(json)
            .unwrap()
            .into_outcome()
            .unwrap();
        assert_eq!(outcome.sent_count(5), 3);
    }

    #[test]
    fn test_sent_count_falls_back_to_details_length() {
        let json = r#"{"success": true, "details": [{"email": "a"}, {"email": "b"}]}"#;

        let outcome = serde_json::from_str::<SendResponse>(json)
            .unwrap()
            .into_outcome()
            .unwrap();
        assert_eq!(outcome.sent_count(5), 2);
    }

    #[test]
    fn test_sent_count_falls_back_to_submitted_count() {
        let json = r#"{"success": true}"#;

        let outcome = serde_json::from_str::<SendResponse>(json)
            .unwrap()
            .into_outcome()
            .unwrap();
        assert_eq!(outcome.sent_count(4), 4);
    }

    #[test]
    fn test_send_payload_serializes_job_id_and_emails() {
        let drafts = vec![EmailDraft {
            email: "ada@example.com".to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
        }];
        let payload = SendPayload {
            job_id: Some("J1"),
            emails: &drafts,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["job_id"], "J1");
        assert_eq!(value["emails"][0]["subject"], "s");
    }
}
