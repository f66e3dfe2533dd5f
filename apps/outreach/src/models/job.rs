use serde::{Deserialize, Serialize};

/// Score above which a job counts as a priority lead on the dashboard.
pub const PRIORITY_SCORE: f64 = 85.0;

/// A discovered job posting. `id` and `is_applied` are always set locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub summary: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Expected 0–100, not enforced.
    pub match_score: f64,
    pub match_reasons: Vec<String>,
    #[serde(default)]
    pub is_applied: bool,
}

/// One element of the discovery response, as the model returns it.
///
/// Any `id` or `isApplied` the model adds is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCandidate {
    pub title: String,
    pub company: String,
    pub location: String,
    pub summary: String,
    pub url: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    pub match_score: f64,
    pub match_reasons: Vec<String>,
}

impl Job {
    /// Builds a not-yet-applied job from a model candidate.
    /// A blank contact email means the model found no verified contact.
    pub fn from_candidate(candidate: JobCandidate, id: String) -> Self {
        let contact_email = candidate
            .contact_email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Self {
            id,
            title: candidate.title,
            company: candidate.company,
            location: candidate.location,
            summary: candidate.summary,
            url: candidate.url,
            contact_email,
            date: candidate.date,
            match_score: candidate.match_score,
            match_reasons: candidate.match_reasons,
            is_applied: false,
        }
    }

    /// True when a contact exists and a match reason explains how it was verified.
    pub fn has_verified_contact(&self) -> bool {
        self.contact_email.is_some()
            && self.match_reasons.iter().any(|r| {
                let r = r.to_lowercase();
                r.contains("verified") || r.contains("found")
            })
    }

    pub fn is_priority(&self) -> bool {
        self.match_score > PRIORITY_SCORE
    }
}
