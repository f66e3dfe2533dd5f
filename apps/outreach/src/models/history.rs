use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::draft::DraftEmail;
use crate::models::job::Job;

/// A sent application. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationHistoryEntry {
    pub id: String,
    pub job_id: String,
    pub company: String,
    pub title: String,
    /// Local calendar date, `YYYY-MM-DD`.
    pub applied_date: String,
    /// The exact subject and body that were handed to the mail client.
    pub email_content: DraftEmail,
}

impl ApplicationHistoryEntry {
    /// Records `email` as sent for `job` today.
    pub fn for_job(job: &Job, email: DraftEmail) -> Self {
        Self {
            id: format!("app-{}", Uuid::new_v4()),
            job_id: job.id.clone(),
            company: job.company.clone(),
            title: job.title.clone(),
            applied_date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            email_content: email,
        }
    }
}
