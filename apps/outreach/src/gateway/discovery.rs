//! Discovery call: asks the model for a batch of verified job openings.

use tracing::{error, info};

use crate::gateway::prompts::{
    discovery_schema, fill_template, DISCOVERY_BATCH_SIZE, DISCOVERY_PROMPT_TEMPLATE,
    DISCOVERY_THINKING_BUDGET,
};
use crate::gateway::{decode_object_list, parse_structured, AiGateway, GatewayFailure, Outcome};
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, NO_INVENTION_INSTRUCTION};
use crate::llm_client::CompletionRequest;
use crate::models::{Job, JobCandidate};

impl AiGateway {
    /// Finds job openings near `location`.
    ///
    /// Fails soft: any failure yields an empty list, which callers cannot tell
    /// apart from a genuinely empty search except through `Outcome::failure`.
    pub async fn discover_jobs(&self, location: &str) -> Outcome<Vec<Job>> {
        let request = discovery_request(location, self.target_roles());

        let result = match self.complete(&request).await {
            Ok(raw) => parse_job_batch(&raw, self.next_batch_stamp()),
            Err(failure) => Err(failure),
        };

        match result {
            Ok(jobs) => {
                info!("Discovery returned {} jobs for '{}'", jobs.len(), location);
                Outcome::Success(jobs)
            }
            Err(reason) => {
                error!("Failed to parse verified job response: {reason}");
                Outcome::Fallback {
                    value: Vec::new(),
                    reason,
                }
            }
        }
    }
}

/// Builds the search-grounded discovery request.
pub fn discovery_request(location: &str, target_roles: &[String]) -> CompletionRequest {
    let roles = if target_roles.is_empty() {
        "\"QA Lead\"".to_string()
    } else {
        target_roles
            .iter()
            .map(|r| format!("\"{r}\""))
            .collect::<Vec<_>>()
            .join(" or ")
    };
    let primary_role = target_roles.first().map(String::as_str).unwrap_or("QA Lead");

    let count = DISCOVERY_BATCH_SIZE.to_string();
    let prompt = fill_template(
        DISCOVERY_PROMPT_TEMPLATE,
        &[
            ("count", count.as_str()),
            ("roles", roles.as_str()),
            ("primary_role", primary_role),
            ("location", location),
            ("no_invention", NO_INVENTION_INSTRUCTION),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );

    CompletionRequest {
        prompt,
        response_schema: discovery_schema(),
        search: true,
        thinking_budget: Some(DISCOVERY_THINKING_BUDGET),
    }
}

/// Parses a raw discovery answer into jobs.
///
/// The top level must be an array and every element must match the schema;
/// one bad element rejects the whole batch. Ids are `job-{stamp}-{index}`, so
/// they are distinct within a batch even for identical elements.
pub fn parse_job_batch(raw: &str, batch_stamp: i64) -> Result<Vec<Job>, GatewayFailure> {
    let candidates: Vec<JobCandidate> = decode_object_list(parse_structured(raw)?)?;

    Ok(candidates
        .into_iter()
        .enumerate()
        .map(|(idx, candidate)| Job::from_candidate(candidate, format!("job-{batch_stamp}-{idx}")))
        .collect())
}
