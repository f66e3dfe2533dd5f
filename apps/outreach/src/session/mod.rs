//! Application view-model: the in-memory state of one interactive session.
//!
//! Owns the transient state (job list, open draft, active screen, loading
//! flag) and drives the injected stores, gateway and compose handoff.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::compose::ComposeHandoff;
use crate::errors::AppError;
use crate::gateway::{AiGateway, Outcome};
use crate::models::{ApplicationHistoryEntry, DraftEmail, Job, UserProfile};
use crate::store::profile_store::ProfileField;
use crate::store::{HistoryStore, ProfileStore};

pub mod commands;
pub mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    FindJobs,
    History,
    Profile,
}

/// Set while a gateway call is in flight. Acquire through `try_begin`; the
/// returned guard clears the flag when dropped, including on cancellation.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

#[must_use]
pub struct LoadingGuard(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn try_begin(&self) -> Result<LoadingGuard, AppError> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::Busy)?;
        Ok(LoadingGuard(self.0.clone()))
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The job being applied to and its editable email.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenDraft {
    pub job: Job,
    pub email: DraftEmail,
}

/// What a confirmed send produced.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    pub compose_url: String,
    pub entry: ApplicationHistoryEntry,
    /// False when the job was no longer in the current list.
    pub flagged_in_list: bool,
}

pub struct Session {
    profile: ProfileStore,
    history: HistoryStore,
    gateway: AiGateway,
    compose: ComposeHandoff,
    location: String,
    jobs: Vec<Job>,
    open_draft: Option<OpenDraft>,
    screen: Screen,
    loading: LoadingFlag,
    notice: Option<String>,
}

impl Session {
    pub fn new(
        profile: ProfileStore,
        history: HistoryStore,
        gateway: AiGateway,
        compose: ComposeHandoff,
        location: String,
    ) -> Self {
        Self {
            profile,
            history,
            gateway,
            compose,
            location,
            jobs: Vec::new(),
            open_draft: None,
            screen: Screen::Dashboard,
            loading: LoadingFlag::default(),
            notice: None,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn profile(&self) -> &UserProfile {
        self.profile.profile()
    }

    pub fn history(&self) -> &[ApplicationHistoryEntry] {
        self.history.entries()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job_at(&self, number: usize) -> Option<&Job> {
        number.checked_sub(1).and_then(|idx| self.jobs.get(idx))
    }

    pub fn history_at(&self, number: usize) -> Option<&ApplicationHistoryEntry> {
        number.checked_sub(1).and_then(|idx| self.history.get(idx))
    }

    pub fn priority_count(&self) -> usize {
        self.jobs.iter().filter(|j| j.is_priority()).count()
    }

    pub fn open_draft(&self) -> Option<&OpenDraft> {
        self.open_draft.as_ref()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn account_slot(&self) -> u8 {
        self.compose.slot()
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    #[cfg(test)]
    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    /// Returns and clears the notice left by the last gateway fallback.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    fn note_outcome<T>(&mut self, what: &str, outcome: &Outcome<T>) {
        self.notice = outcome.failure().map(|f| format!("{what}: {f}"));
    }

    // ── Operations ─────────────────────────────────────────────────────────

    /// Runs a discovery call and replaces the job list with its result.
    /// `location` overrides the session's search location from now on.
    pub async fn search(&mut self, location: Option<&str>) -> Result<usize, AppError> {
        let _guard = self.loading.try_begin()?;

        if let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) {
            self.location = location.to_string();
        }

        let outcome = self.gateway.discover_jobs(&self.location).await;
        self.note_outcome("Job discovery failed", &outcome);
        self.jobs = outcome.into_value();
        self.screen = Screen::FindJobs;
        Ok(self.jobs.len())
    }

    /// Drafts an email for the job with `job_id` and opens it for editing.
    pub async fn start_draft(&mut self, job_id: &str) -> Result<&OpenDraft, AppError> {
        let job = self
            .jobs
            .iter()
            .find(|j| j.id == job_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No job with id {job_id}")))?;

        let _guard = self.loading.try_begin()?;
        let outcome = self.gateway.draft_email(&job, self.profile.profile()).await;
        self.note_outcome("Draft generation failed, using template", &outcome);

        Ok(self.open_draft.insert(OpenDraft {
            job,
            email: outcome.into_value(),
        }))
    }

    pub fn edit_subject(&mut self, subject: &str) -> Result<(), AppError> {
        let draft = self.open_draft.as_mut().ok_or(AppError::NoDraft)?;
        draft.email.subject = subject.to_string();
        Ok(())
    }

    pub fn edit_body(&mut self, body: &str) -> Result<(), AppError> {
        let draft = self.open_draft.as_mut().ok_or(AppError::NoDraft)?;
        draft.email.body = body.to_string();
        Ok(())
    }

    pub fn discard_draft(&mut self) -> Result<(), AppError> {
        self.open_draft.take().map(|_| ()).ok_or(AppError::NoDraft)
    }

    /// Hands the open draft to the mail client and records it as sent.
    ///
    /// Recording happens on confirmation, not delivery: the mail client gives
    /// no feedback. The draft stays open if recording fails.
    pub fn confirm_send(&mut self) -> Result<SendReceipt, AppError> {
        let OpenDraft { job, email } = self.open_draft.clone().ok_or(AppError::NoDraft)?;

        let recipient = job.contact_email.as_deref().unwrap_or("");
        let compose_url = self.compose.open(recipient, &email);
        let (entry, flagged_in_list) = self.record_send(&job, email)?;

        self.open_draft = None;
        Ok(SendReceipt {
            compose_url,
            entry,
            flagged_in_list,
        })
    }

    /// Prepends a history entry for `job` and marks the matching job in the
    /// current list as applied. Returns whether such a job was still listed.
    pub fn record_send(
        &mut self,
        job: &Job,
        email: DraftEmail,
    ) -> Result<(ApplicationHistoryEntry, bool), AppError> {
        let entry = ApplicationHistoryEntry::for_job(job, email);
        self.history.record(entry.clone())?;

        let mut flagged = false;
        for listed in self.jobs.iter_mut().filter(|j| j.id == job.id) {
            listed.is_applied = true;
            flagged = true;
        }

        info!(
            "Recorded application to {} at {} ({})",
            job.title, job.company, entry.id
        );
        Ok((entry, flagged))
    }

    pub fn update_profile(&mut self, field: ProfileField, value: &str) -> Result<(), AppError> {
        self.profile.set_field(field, value)
    }
}
