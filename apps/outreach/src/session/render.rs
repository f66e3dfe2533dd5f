//! Plain-text rendering of the session screens.

use colored::Colorize;

use crate::models::{ApplicationHistoryEntry, Job, UserProfile};
use crate::session::{OpenDraft, Screen, SendReceipt, Session};

pub fn render_screen(session: &Session) -> String {
    match session.screen() {
        Screen::Dashboard => render_dashboard(
            session.profile(),
            session.priority_count(),
            session.location(),
        ),
        Screen::FindJobs => render_jobs(session.jobs(), session.location(), &session.profile().email),
        Screen::History => render_history(session.history(), &session.profile().email),
        Screen::Profile => render_profile(session.profile()),
    }
}

pub fn render_dashboard(profile: &UserProfile, priority_leads: usize, location: &str) -> String {
    format!(
        "{}\n\n  {}  {}\n  {}+ years experience\n  {} priority leads (score > 85)\n  Hub location: {}\n\n\
         Type `search` to find verified roles and draft applications sent from {}.",
        format!("Welcome, {}", profile.first_name()).bold(),
        profile.name,
        profile.email.dimmed(),
        profile.years_of_experience,
        priority_leads,
        location,
        profile.email,
    )
}

fn score_badge(score: f64) -> String {
    let label = format!("{score:.0}% match");
    if score >= 80.0 {
        label.green().to_string()
    } else if score >= 60.0 {
        label.yellow().to_string()
    } else {
        label
    }
}

pub fn render_job(number: usize, job: &Job) -> String {
    let mut out = format!(
        "{:>2}. {} at {}  [{}]{}\n    {}\n    {}",
        number,
        job.title.bold(),
        job.company,
        score_badge(job.match_score),
        if job.is_applied {
            format!("  {}", "APPLIED".cyan())
        } else {
            String::new()
        },
        job.location,
        job.summary,
    );

    match &job.contact_email {
        Some(email) if job.has_verified_contact() => {
            out.push_str(&format!("\n    Contact: {} {}", email, "(verified)".green()));
        }
        Some(email) => out.push_str(&format!("\n    Contact: {email}")),
        None => out.push_str("\n    Contact: none found, apply through the portal"),
    }
    for reason in &job.match_reasons {
        out.push_str(&format!("\n    - {reason}"));
    }
    out.push_str(&format!("\n    {}", job.url.dimmed()));
    out
}

pub fn render_jobs(jobs: &[Job], location: &str, sender: &str) -> String {
    if jobs.is_empty() {
        return format!(
            "No roles yet for {location}.\n\
             Run `search` to start a verification scan. Results cross-reference active hiring status before recommending."
        );
    }

    let mut out = format!("Active roles in {location} (outreach from {sender})\n");
    for (idx, job) in jobs.iter().enumerate() {
        out.push('\n');
        out.push_str(&render_job(idx + 1, job));
        out.push('\n');
    }
    out
}

pub fn render_history(entries: &[ApplicationHistoryEntry], sender: &str) -> String {
    if entries.is_empty() {
        return "No applications sent yet. Start applying from the jobs list.".to_string();
    }

    let mut out = format!("Applications sent from {sender}\n");
    for (idx, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "\n{:>2}. {}  {}  {}",
            idx + 1,
            entry.company.bold(),
            entry.title,
            entry.applied_date.dimmed()
        ));
    }
    out
}

pub fn render_entry(entry: &ApplicationHistoryEntry) -> String {
    format!(
        "Subject: {}\n\n{}",
        entry.email_content.subject, entry.email_content.body
    )
}

pub fn render_profile(profile: &UserProfile) -> String {
    format!(
        "name     {}\nemail    {}\nresume   {}\nyears    {}\nskills   {}\ntools    {}\ndomains  {}\nsummary  {}",
        profile.name,
        profile.email,
        profile.resume_link.as_deref().unwrap_or("(none)"),
        profile.years_of_experience,
        profile.primary_skills.join(", "),
        profile.tools.join(", "),
        profile.domains.join(", "),
        profile.summary,
    )
}

pub fn render_draft(draft: &OpenDraft, sender: &str) -> String {
    format!(
        "{}\nSending as: {}\nTo: {}\nSubject: {}\n\n{}\n\n{}",
        format!("Draft for {} at {}", draft.job.title, draft.job.company).bold(),
        sender,
        draft
            .job
            .contact_email
            .as_deref()
            .unwrap_or("Hiring Team / Company Portal"),
        draft.email.subject,
        draft.email.body,
        "Attach your resume manually once Gmail opens. `send` to confirm, `discard` to close."
            .dimmed(),
    )
}

/// Confirmation printed after a send.
pub fn render_send_receipt(receipt: &SendReceipt, account_slot: u8) -> String {
    let mut out = format!(
        "Opened Gmail compose (account slot {}). Recorded application to {} at {}.",
        account_slot, receipt.entry.title, receipt.entry.company
    );
    if !receipt.flagged_in_list {
        out.push_str(&format!(
            "\n{}",
            "The job is no longer in the current list; only history was updated.".yellow()
        ));
    }
    out.push_str(&format!("\n{}", receipt.compose_url.dimmed()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DraftEmail;

    fn plain() {
        colored::control::set_override(false);
    }

    fn job(contact: Option<&str>, reasons: &[&str], applied: bool) -> Job {
        Job {
            id: "job-1-0".to_string(),
            title: "QA Lead".to_string(),
            company: "Acme".to_string(),
            location: "Bangalore".to_string(),
            summary: "Own release quality".to_string(),
            url: "https://acme.example/jobs/qa".to_string(),
            contact_email: contact.map(str::to_string),
            date: None,
            match_score: 91.0,
            match_reasons: reasons.iter().map(|r| r.to_string()).collect(),
            is_applied: applied,
        }
    }

    #[test]
    fn test_empty_job_list_shows_empty_state() {
        plain();
        let out = render_jobs(&[], "Bangalore, India", "me@example.com");
        assert!(out.starts_with("No roles yet for Bangalore, India"));
    }

    #[test]
    fn test_job_card_shows_score_contact_and_applied() {
        plain();
        let out = render_job(
            1,
            &job(Some("hr@acme.example"), &["Verified recruiter pattern"], true),
        );
        assert!(out.contains("91% match"));
        assert!(out.contains("hr@acme.example (verified)"));
        assert!(out.contains("APPLIED"));
        assert!(out.contains("- Verified recruiter pattern"));
    }

    #[test]
    fn test_job_card_without_contact() {
        plain();
        let out = render_job(2, &job(None, &[], false));
        assert!(out.contains("none found"));
        assert!(!out.contains("APPLIED"));
    }

    #[test]
    fn test_history_and_entry() {
        plain();
        assert!(render_history(&[], "me@example.com").starts_with("No applications"));

        let entry = ApplicationHistoryEntry {
            id: "app-1".to_string(),
            job_id: "job-1-0".to_string(),
            company: "Acme".to_string(),
            title: "QA Lead".to_string(),
            applied_date: "2026-10-19".to_string(),
            email_content: DraftEmail::new("Hello", "Body text"),
        };
        let list = render_history(std::slice::from_ref(&entry), "me@example.com");
        assert!(list.contains(" 1. Acme  QA Lead  2026-10-19"));
        assert_eq!(render_entry(&entry), "Subject: Hello\n\nBody text");
    }

    #[test]
    fn test_profile_without_resume() {
        plain();
        let profile = UserProfile {
            resume_link: None,
            ..UserProfile::default()
        };
        assert!(render_profile(&profile).contains("resume   (none)"));
    }

    #[test]
    fn test_draft_without_contact_names_portal() {
        plain();
        let draft = OpenDraft {
            job: job(None, &[], false),
            email: DraftEmail::new("Subject line", "Body"),
        };
        let out = render_draft(&draft, "me@example.com");
        assert!(out.contains("To: Hiring Team / Company Portal"));
        assert!(out.contains("Subject: Subject line"));
    }

    #[test]
    fn test_send_receipt_mentions_stale_job() {
        plain();
        let entry = ApplicationHistoryEntry::for_job(
            &job(None, &[], false),
            DraftEmail::new("Subject", "Body"),
        );
        let mut receipt = SendReceipt {
            compose_url: "https://mail.google.com/mail/u/2/?view=cm".to_string(),
            entry,
            flagged_in_list: true,
        };

        let listed = render_send_receipt(&receipt, 2);
        assert!(listed.starts_with("Opened Gmail compose (account slot 2)"));
        assert!(listed.contains("QA Lead at Acme"));
        assert!(listed.ends_with("https://mail.google.com/mail/u/2/?view=cm"));
        assert!(!listed.contains("no longer in the current list"));

        receipt.flagged_in_list = false;
        assert!(render_send_receipt(&receipt, 2).contains("no longer in the current list"));
    }

    #[test]
    fn test_dashboard_greets_by_first_name() {
        plain();
        let out = render_dashboard(&UserProfile::default(), 3, "Bangalore, India");
        assert!(out.starts_with("Welcome, Nireesha"));
        assert!(out.contains("3 priority leads"));
    }
}
