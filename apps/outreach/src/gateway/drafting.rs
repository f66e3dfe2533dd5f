//! Draft call: composes one outreach email for a job.
//!
//! Unlike discovery, a failed draft never comes back empty: the editor always
//! gets the locally synthesized template.

use tracing::warn;

use crate::gateway::prompts::{draft_schema, fill_template, DRAFT_PROMPT_TEMPLATE};
use crate::gateway::{decode_object, parse_structured, AiGateway, GatewayFailure, Outcome};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::CompletionRequest;
use crate::models::{DraftEmail, Job, UserProfile};

/// Addressee used when the job has no verified contact.
pub const PLACEHOLDER_RECIPIENT: &str = "Hiring Manager";

impl AiGateway {
    pub async fn draft_email(&self, job: &Job, profile: &UserProfile) -> Outcome<DraftEmail> {
        let request = draft_request(job, profile);

        let result = match self.complete(&request).await {
            Ok(raw) => parse_draft(&raw),
            Err(failure) => Err(failure),
        };

        match result {
            Ok(draft) => Outcome::Success(draft),
            Err(reason) => {
                warn!(
                    "Draft for '{}' at '{}' fell back to template: {reason}",
                    job.title, job.company
                );
                Outcome::Fallback {
                    value: fallback_draft(job, profile),
                    reason,
                }
            }
        }
    }
}

/// Tone instruction scaled to the candidate's seniority.
pub fn tone_for_years(years: u32) -> &'static str {
    match years {
        0..=2 => "Professional, eager early-career tone",
        3..=5 => "Professional, confident practitioner tone",
        6..=9 => "Professional, leadership tone",
        _ => "Professional, senior leadership tone with strategic focus",
    }
}

pub fn draft_request(job: &Job, profile: &UserProfile) -> CompletionRequest {
    let resume_instruction = match &profile.resume_link {
        Some(link) => format!("Include the resume link clearly and verbatim: {link}"),
        None => "The candidate has no public resume link; say the resume is available on request."
            .to_string(),
    };

    let years = profile.years_of_experience.to_string();
    let prompt = fill_template(
        DRAFT_PROMPT_TEMPLATE,
        &[
            ("title", job.title.as_str()),
            ("company", job.company.as_str()),
            (
                "recipient",
                job.contact_email.as_deref().unwrap_or(PLACEHOLDER_RECIPIENT),
            ),
            ("job_summary", job.summary.as_str()),
            ("candidate_summary", profile.summary.as_str()),
            ("tone", tone_for_years(profile.years_of_experience)),
            ("years", years.as_str()),
            ("resume_instruction", resume_instruction.as_str()),
            ("email", profile.email.as_str()),
            ("name", profile.name.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );

    CompletionRequest {
        prompt,
        response_schema: draft_schema(),
        search: false,
        thinking_budget: None,
    }
}

/// Parses a raw draft answer. A subject or body that is blank counts as empty.
pub fn parse_draft(raw: &str) -> Result<DraftEmail, GatewayFailure> {
    let draft: DraftEmail = decode_object(parse_structured(raw)?)?;
    if draft.subject.trim().is_empty() || draft.body.trim().is_empty() {
        return Err(GatewayFailure::Empty);
    }
    Ok(draft)
}

/// Deterministic draft used whenever the model's answer is unusable.
pub fn fallback_draft(job: &Job, profile: &UserProfile) -> DraftEmail {
    let subject = format!("Application for {} - {}", job.title, profile.name);

    let resume_line = match &profile.resume_link {
        Some(link) => format!("You can view my professional resume here: {link}"),
        None => "My resume is available on request.".to_string(),
    };

    let body = format!(
        "Dear Hiring Team,\n\n\
         I am {name}, a professional with {years}+ years of experience. \
         I am writing to express my strong interest in the {title} position at {company}.\n\n\
         {resume_line}\n\n\
         Best regards,\n\
         {name}",
        name = profile.name,
        years = profile.years_of_experience,
        title = job.title,
        company = job.company,
    );

    DraftEmail::new(subject, body)
}
