use serde::{Deserialize, Serialize};

use crate::config::Config;

/// The role submitted alongside candidates when requesting drafts.
/// Built fresh per create request: operator-edited description plus the
/// configured company metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub location: String,
    pub contact_email: String,
}

impl Job {
    pub fn from_description(description: &str, config: &Config) -> Self {
        Job {
            title: config.job_title.clone(),
            description: description.to_string(),
            company_name: config.company_name.clone(),
            location: config.company_location.clone(),
            contact_email: config.contact_email.clone(),
        }
    }
}
