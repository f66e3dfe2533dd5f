use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::models::UserProfile;
use crate::store::{load_document, save_document, Storage, PROFILE_KEY};

/// An editable profile field, addressed by its shell name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    ResumeLink,
    Years,
    Summary,
    Skills,
    Tools,
    Domains,
}

impl ProfileField {
    pub const ALL: [ProfileField; 8] = [
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::ResumeLink,
        ProfileField::Years,
        ProfileField::Summary,
        ProfileField::Skills,
        ProfileField::Tools,
        ProfileField::Domains,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(ProfileField::Name),
            "email" => Some(ProfileField::Email),
            "resume" | "resume_link" => Some(ProfileField::ResumeLink),
            "years" | "experience" => Some(ProfileField::Years),
            "summary" => Some(ProfileField::Summary),
            "skills" => Some(ProfileField::Skills),
            "tools" => Some(ProfileField::Tools),
            "domains" => Some(ProfileField::Domains),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::ResumeLink => "resume",
            ProfileField::Years => "years",
            ProfileField::Summary => "summary",
            ProfileField::Skills => "skills",
            ProfileField::Tools => "tools",
            ProfileField::Domains => "domains",
        }
    }
}

/// Owns the single `UserProfile` of the session.
pub struct ProfileStore {
    storage: Arc<dyn Storage>,
    profile: UserProfile,
}

impl ProfileStore {
    /// Loads the stored profile, or writes and returns the default on first run.
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, AppError> {
        let profile = match load_document::<UserProfile>(storage.as_ref(), PROFILE_KEY)? {
            Some(profile) => profile,
            None => {
                info!("No saved profile found, writing default profile");
                let profile = UserProfile::default();
                save_document(storage.as_ref(), PROFILE_KEY, &profile)?;
                profile
            }
        };

        Ok(Self { storage, profile })
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Replaces the whole profile and persists it. Memory is only updated
    /// once the write succeeded.
    pub fn replace(&mut self, profile: UserProfile) -> Result<(), AppError> {
        save_document(self.storage.as_ref(), PROFILE_KEY, &profile)?;
        self.profile = profile;
        Ok(())
    }

    /// Applies one textual edit. List fields take comma-separated values;
    /// an empty resume link clears it.
    pub fn set_field(&mut self, field: ProfileField, value: &str) -> Result<(), AppError> {
        let value = value.trim();
        let mut next = self.profile.clone();

        match field {
            ProfileField::Name => next.name = require_text(field, value)?,
            ProfileField::Email => next.email = require_text(field, value)?,
            ProfileField::ResumeLink => {
                next.resume_link = (!value.is_empty()).then(|| value.to_string())
            }
            ProfileField::Years => {
                next.years_of_experience = value.parse::<u32>().map_err(|_| {
                    AppError::Validation(format!(
                        "years must be a whole number of years, got '{value}'"
                    ))
                })?
            }
            ProfileField::Summary => next.summary = value.to_string(),
            ProfileField::Skills => next.primary_skills = split_list(value),
            ProfileField::Tools => next.tools = split_list(value),
            ProfileField::Domains => next.domains = split_list(value),
        }

        self.replace(next)
    }
}

fn require_text(field: ProfileField, value: &str) -> Result<String, AppError> {
    if value.is_empty() {
        return Err(AppError::Validation(format!(
            "{} cannot be empty",
            field.as_str()
        )));
    }
    Ok(value.to_string())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    #[test]
    fn test_first_run_writes_default() {
        let storage = Arc::new(MemoryStorage::default());
        let store = ProfileStore::load(storage.clone()).unwrap();
        assert_eq!(store.profile(), &UserProfile::default());

        let saved: UserProfile =
            serde_json::from_str(&storage.get(PROFILE_KEY).unwrap()).unwrap();
        assert_eq!(saved, UserProfile::default());
    }

    #[test]
    fn test_round_trip_through_files() {
        let dir = TempDir::new().unwrap();
        let profile = UserProfile {
            name: "Ravi Menon".to_string(),
            years_of_experience: 12,
            primary_skills: vec!["Test Strategy".to_string()],
            tools: vec![],
            summary: "Leads QA for payments".to_string(),
            domains: vec!["Fintech".to_string(), "Banking".to_string()],
            email: "ravi@example.com".to_string(),
            resume_link: None,
        };

        {
            let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
            let mut store = ProfileStore::load(storage).unwrap();
            store.replace(profile.clone()).unwrap();
        }

        let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let reloaded = ProfileStore::load(storage).unwrap();
        assert_eq!(reloaded.profile(), &profile);
        assert_eq!(reloaded.profile().resume_link, None);

        let raw = std::fs::read_to_string(dir.path().join("qa_outreach_profile.json")).unwrap();
        assert!(!raw.contains("resumeLink"));
    }

    #[test]
    fn test_corrupt_profile_is_an_error_not_a_reset() {
        let storage = Arc::new(MemoryStorage::with(PROFILE_KEY, "{\"name\": "));
        let err = ProfileStore::load(storage.clone()).err().unwrap();
        assert!(matches!(err, AppError::CorruptDocument { .. }));
        assert_eq!(storage.get(PROFILE_KEY).as_deref(), Some("{\"name\": "));
    }

    #[test]
    fn test_set_years_rejects_non_numeric() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = ProfileStore::load(storage.clone()).unwrap();
        let before = storage.get(PROFILE_KEY);

        let err = store.set_field(ProfileField::Years, "eight").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.profile().years_of_experience, 8);
        assert_eq!(storage.get(PROFILE_KEY), before);
    }

    #[test]
    fn test_set_field_persists_immediately() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = ProfileStore::load(storage.clone()).unwrap();
        store.set_field(ProfileField::Years, " 10 ").unwrap();
        store
            .set_field(ProfileField::Tools, "JIRA, , Xray ,Postman")
            .unwrap();

        let saved: UserProfile =
            serde_json::from_str(&storage.get(PROFILE_KEY).unwrap()).unwrap();
        assert_eq!(saved.years_of_experience, 10);
        assert_eq!(saved.tools, vec!["JIRA", "Xray", "Postman"]);
    }

    #[test]
    fn test_empty_resume_clears_link() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = ProfileStore::load(storage).unwrap();
        store.set_field(ProfileField::ResumeLink, "").unwrap();
        assert_eq!(store.profile().resume_link, None);
    }

    #[test]
    fn test_empty_name_rejected() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = ProfileStore::load(storage).unwrap();
        assert!(store.set_field(ProfileField::Name, "   ").is_err());
        assert_eq!(store.profile().name, "Nireesha Kalyanam");
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in ProfileField::ALL {
            assert_eq!(ProfileField::parse(field.as_str()), Some(field));
        }
        assert_eq!(ProfileField::parse("salary"), None);
    }
}
