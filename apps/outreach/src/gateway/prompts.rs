// All prompt templates and response schemas for the AI gateway.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::{json, Value};

/// Number of openings requested per discovery call.
pub const DISCOVERY_BATCH_SIZE: u32 = 10;

/// Deliberation budget for the search-grounded discovery call.
pub const DISCOVERY_THINKING_BUDGET: u32 = 15000;

/// Job discovery prompt template.
/// Replace: {count}, {roles}, {location}, {primary_role}, {no_invention}, {json_only}
pub const DISCOVERY_PROMPT_TEMPLATE: &str = r#"Find {count} HIGH-PRIORITY, ACTIVE job openings for {roles} in {location}.

STRICT VERIFICATION PROTOCOL:
For every company found, you MUST perform deep searches to find the CORRECT hiring contact.
1. Search for: "[Company Name] {location} {primary_role} recruiter email"
2. Search for: "[Company Name] HR contact email"
3. Look for naming patterns (e.g., firstname.lastname@company.com) by finding the names of HR managers for that company in {location} via search results.
4. CROSS-CHECK: Ensure the email is NOT a generic 'info@' address unless no other option exists. Prefer 'careers@', 'hr@', or specific recruiter names.
5. RECENCY: Only include jobs posted within the last 7 days.

If you cannot find a verified email, do not hallucinate one. Leave the field empty.
In 'matchReasons', explain HOW the email was verified (e.g., "Found on official careers page", "Verified recruiter pattern").

{no_invention}

{json_only}"#;

/// Outreach email prompt template.
/// Replace: {name}, {email}, {title}, {company}, {recipient}, {tone}, {years},
///          {job_summary}, {candidate_summary}, {resume_instruction}, {json_only}
pub const DRAFT_PROMPT_TEMPLATE: &str = r#"Generate a high-impact application email for {name} ({email}).

Job: {title} at {company}
Recipient: {recipient}
Role summary: {job_summary}

Candidate summary: {candidate_summary}

Instructions:
1. {tone} ({years}+ years experience).
2. Mention specific verified details about the role if found in the summary.
3. {resume_instruction}
4. Ensure the name {name} is used and the email is signed by {name}.

{json_only}"#;

/// Substitutes `{key}` placeholders in one left-to-right pass. Inserted values
/// are never rescanned, so braces inside user or model text survive verbatim.
/// Unknown `{...}` sequences are kept as written.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values.iter().find_map(|&(key, value)| {
            tail.strip_prefix(key)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Response schema for discovery: an array of job objects.
pub fn discovery_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "company": { "type": "STRING" },
                "location": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "url": { "type": "STRING" },
                "contactEmail": {
                    "type": "STRING",
                    "description": "VERIFIED HR or Recruiter email. Must be cross-checked."
                },
                "matchScore": { "type": "NUMBER" },
                "matchReasons": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Evidence of verification"
                }
            },
            "required": ["title", "company", "location", "summary", "url", "matchScore", "matchReasons"]
        }
    })
}

/// Response schema for drafting: a single subject/body object.
pub fn draft_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "subject": { "type": "STRING" },
            "body": { "type": "STRING" }
        },
        "required": ["subject", "body"]
    })
}
