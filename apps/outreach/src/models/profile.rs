use serde::{Deserialize, Serialize};

/// The user's identity and resume data. Persisted whole under one storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub years_of_experience: u32,
    pub primary_skills: Vec<String>,
    pub tools: Vec<String>,
    pub summary: String,
    pub domains: Vec<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_link: Option<String>,
}

impl UserProfile {
    /// First name, used by the dashboard greeting.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

impl Default for UserProfile {
    /// Profile written on first run.
    fn default() -> Self {
        Self {
            name: "Nireesha Kalyanam".to_string(),
            years_of_experience: 8,
            primary_skills: to_strings(&[
                "Manual Testing",
                "Test Planning",
                "Regression Testing",
                "UAT Coordination",
                "Defect Management",
                "Team Leadership",
                "SDLC/STLC",
            ]),
            tools: to_strings(&["JIRA", "TestRail", "Zephyr", "Postman", "Confluence"]),
            summary: "Senior QA Lead with 8+ years of expertise in manual testing, leading \
                complex functional and regression cycles. Proven track record in mentoring \
                teams and driving high-quality releases."
                .to_string(),
            domains: to_strings(&["E-commerce", "Fintech", "Healthcare"]),
            email: "nireesha.kalyanam@gmail.com".to_string(),
            resume_link: Some("https://drive.google.com/your-resume-link".to_string()),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(UserProfile::default()).unwrap();
        assert_eq!(json["yearsOfExperience"], 8);
        assert!(json["primarySkills"].is_array());
        assert!(json["resumeLink"].is_string());
    }

    #[test]
    fn test_absent_resume_link_is_omitted() {
        let profile = UserProfile {
            resume_link: None,
            ..UserProfile::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("resumeLink").is_none());

        let back: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back.resume_link, None);
    }

    #[test]
    fn test_first_name() {
        assert_eq!(UserProfile::default().first_name(), "Nireesha");
        let solo = UserProfile {
            name: "Cher".to_string(),
            ..UserProfile::default()
        };
        assert_eq!(solo.first_name(), "Cher");
    }
}
