use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Aborts at startup if the service base URL or access key is missing —
/// a malformed endpoint is not worth discovering one failed request at a time.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the outreach service, without a trailing slash.
    pub base_url: String,
    /// Access code appended to every request as the `code` query parameter.
    pub access_key: String,
    pub job_title: String,
    pub company_name: String,
    pub company_location: String,
    pub contact_email: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            base_url: require_env("OUTREACH_BASE_URL")?,
            access_key: require_env("OUTREACH_ACCESS_KEY")?,
            job_title: optional_env("OUTREACH_JOB_TITLE", "Recruiter Role"),
            company_name: optional_env("OUTREACH_COMPANY_NAME", "Atypical Advantage"),
            company_location: optional_env("OUTREACH_COMPANY_LOCATION", "India"),
            contact_email: optional_env("OUTREACH_CONTACT_EMAIL", "jobs@atypicaladvantage.in"),
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
