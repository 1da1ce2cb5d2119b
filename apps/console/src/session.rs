//! Outreach session controller — owns the operator's session state and
//! mediates between console actions and the remote service.
//!
//! State handling is deliberately blunt: each top-level action replaces its
//! session field wholesale, and a failed call leaves every field exactly as
//! it was. There is no merging, no diffing, and no partial update anywhere.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::api::OutreachApi;
use crate::candidates::CandidateSource;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{Candidate, DeliveryDetail, DraftField, EmailDraft, Job};

/// Process-local session state.
///
/// `selected` stays a subset of candidate emails because the console only
/// offers known emails for selection; the controller itself does not police
/// it. `job_id` is meaningful only while `drafts` is non-empty.
#[derive(Debug, Default)]
pub struct Session {
    pub candidates: Vec<Candidate>,
    pub selected: BTreeSet<String>,
    pub drafts: Vec<EmailDraft>,
    pub job_id: Option<String>,
}

/// What a successful send reports back to the operator.
#[derive(Debug)]
pub struct SendReport {
    pub sent: usize,
    pub details: Option<Vec<DeliveryDetail>>,
}

pub struct SessionController {
    session: Session,
    api: Arc<dyn OutreachApi>,
    source: Arc<dyn CandidateSource>,
    config: Config,
}

impl SessionController {
    pub fn new(api: Arc<dyn OutreachApi>, source: Arc<dyn CandidateSource>, config: Config) -> Self {
        Self {
            session: Session::default(),
            api,
            source,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replaces the candidate list from the source. Selection, drafts, and
    /// job id are untouched. Returns the new list length.
    pub fn load_candidates(&mut self) -> usize {
        self.session.candidates = self.source.candidates();
        self.session.candidates.len()
    }

    /// Replaces the selected recipient set wholesale — the last call wins,
    /// selections never accumulate. Selecting before any load is fine; the
    /// selection is simply against an empty list.
    pub fn set_selection(&mut self, emails: BTreeSet<String>) {
        self.session.selected = emails;
    }

    /// Requests drafts for the selected candidates. On success the draft
    /// list and job id are replaced and the draft count returned; on any
    /// failure both are left unchanged.
    pub async fn create_drafts(&mut self, job_description: &str) -> Result<usize, AppError> {
        if self.session.selected.is_empty() {
            return Err(AppError::Validation(
                "select at least one candidate".to_string(),
            ));
        }

        let recipients: Vec<Candidate> = self
            .session
            .candidates
            .iter()
            .filter(|c| self.session.selected.contains(&c.email))
            .cloned()
            .collect();
        let job = Job::from_description(job_description, &self.config);

        let outcome = self.api.create_drafts(&job, &recipients).await?;

        let count = outcome.emails.len();
        self.session.drafts = outcome.emails;
        self.session.job_id = Some(outcome.job_id);
        info!(count, "draft list replaced");
        Ok(count)
    }

    /// Mutates one field of the draft at `index` in place. Never reorders
    /// or resizes the draft list.
    pub fn edit_draft(
        &mut self,
        index: usize,
        field: DraftField,
        value: String,
    ) -> Result<(), AppError> {
        let draft = self
            .session
            .drafts
            .get_mut(index)
            .ok_or_else(|| AppError::Validation(format!("no draft at index {index}")))?;
        match field {
            DraftField::Subject => draft.subject = value,
            DraftField::Body => draft.body = value,
        }
        Ok(())
    }

    /// Sends the current (possibly edited) drafts. On success the draft list
    /// is cleared wholesale — `job_id` is orphaned until the next successful
    /// create. On failure the drafts stay untouched so the operator can
    /// retry the send.
    pub async fn send_emails(&mut self) -> Result<SendReport, AppError> {
        if self.session.drafts.is_empty() {
            return Err(AppError::Validation("no emails to send".to_string()));
        }

        let outcome = self
            .api
            .send_emails(self.session.job_id.as_deref(), &self.session.drafts)
            .await?;

        let sent = outcome.sent_count(self.session.drafts.len());
        self.session.drafts.clear();
        info!(sent, "drafts sent and cleared");
        Ok(SendReport {
            sent,
            details: outcome.details,
        })
    }

    /// Fire-and-forget diagnostic. No effect on session state.
    pub async fn check_health(&self) -> Result<Value, AppError> {
        self.api.check_health().await
    }
}
