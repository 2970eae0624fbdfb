use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::models::role::TargetRole;

const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Client configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout: Duration,
    pub target_role: TargetRole,
    pub resume_path: Option<PathBuf>,
    pub skills: Option<String>,
    pub output_path: PathBuf,
    /// `breakdown` (default) or `summary`.
    pub assessment_view: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let target_role = require_env("TARGET_ROLE")?
            .parse::<TargetRole>()
            .context("TARGET_ROLE must be one of the supported role slugs")?;

        let resume_path = optional_env("RESUME_PATH").map(PathBuf::from);
        let skills = optional_env("SKILLS");
        if resume_path.is_none() && skills.is_none() {
            bail!("Either RESUME_PATH or SKILLS must be set");
        }

        let timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse::<u64>()
            .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            api_url: optional_env("PATHFINDER_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            target_role,
            resume_path,
            skills,
            output_path: optional_env("OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("roadmap.html")),
            assessment_view: optional_env("ASSESSMENT_VIEW")
                .unwrap_or_else(|| "breakdown".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
