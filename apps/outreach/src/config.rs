use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::compose::DEFAULT_ACCOUNT_SLOT;
use crate::llm_client::DEFAULT_API_BASE_URL;

const DEFAULT_LOCATION: &str = "Bangalore, India";
const DEFAULT_TARGET_ROLES: &[&str] = &[
    "QA Lead",
    "Test Lead",
    "Manual Test Lead",
    "Senior QA Engineer",
    "Senior Test Engineer",
];

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base_url: String,
    pub data_dir: PathBuf,
    pub location: String,
    pub target_roles: Vec<String>,
    /// Index of the signed-in Google account that should send the mail.
    pub mail_account_slot: u8,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_base_url: optional_env("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            data_dir: optional_env("OUTREACH_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            location: optional_env("OUTREACH_LOCATION")
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            target_roles: optional_env("OUTREACH_TARGET_ROLES")
                .map(|v| parse_roles(&v))
                .filter(|roles| !roles.is_empty())
                .unwrap_or_else(|| DEFAULT_TARGET_ROLES.iter().map(|r| r.to_string()).collect()),
            mail_account_slot: optional_env("MAIL_ACCOUNT_SLOT")
                .map(|v| v.parse::<u8>())
                .transpose()
                .context("MAIL_ACCOUNT_SLOT must be a small non-negative integer")?
                .unwrap_or(DEFAULT_ACCOUNT_SLOT),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("outreach"))
        .unwrap_or_else(|| PathBuf::from(".outreach"))
}

fn parse_roles(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}
