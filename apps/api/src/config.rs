use anyhow::{Context, Result};

use crate::store::BatchPolicy;

const DEFAULT_COMPLETION_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_EMAIL_DOMAIN_SUFFIX: &str = "@eagles.oc.edu";

/// Application configuration loaded from environment variables.
/// Startup aborts if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub openai_api_key: String,
    pub completion_api_url: String,
    pub completion_timeout_secs: u64,
    /// Signup is restricted to addresses ending with this suffix.
    pub email_domain_suffix: String,
    pub batch_policy: BatchPolicy,
    pub session_inactivity_minutes: i64,
    pub secure_cookies: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            db_host: require("DB_HOST")?,
            db_port: optional("DB_PORT", "5432")
                .parse()
                .context("DB_PORT must be a valid port number")?,
            db_user: require("DB_USER")?,
            db_password: require("DB_PASSWORD")?,
            db_name: require("DB_NAME")?,
            db_max_connections: optional("DB_MAX_CONNECTIONS", "10")
                .parse()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            openai_api_key: require("OPENAI_API_KEY")?,
            completion_api_url: optional("COMPLETION_API_URL", DEFAULT_COMPLETION_API_URL),
            completion_timeout_secs: optional("COMPLETION_TIMEOUT_SECS", "120")
                .parse()
                .context("COMPLETION_TIMEOUT_SECS must be a number of seconds")?,
            email_domain_suffix: optional("EMAIL_DOMAIN_SUFFIX", DEFAULT_EMAIL_DOMAIN_SUFFIX),
            batch_policy: optional("RESUME_BATCH_POLICY", "all_or_nothing")
                .parse()
                .context("RESUME_BATCH_POLICY must be 'all_or_nothing' or 'best_effort'")?,
            session_inactivity_minutes: optional("SESSION_INACTIVITY_MINUTES", "60")
                .parse()
                .context("SESSION_INACTIVITY_MINUTES must be a number of minutes")?,
            secure_cookies: optional("SECURE_COOKIES", "false")
                .parse()
                .context("SECURE_COOKIES must be 'true' or 'false'")?,
            port: optional("PORT", "8080")
                .parse()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
impl Config {
    /// A config suitable for router tests; never touches the environment.
    pub fn for_tests() -> Self {
        Self::from_lookup(|key| match key {
            "DB_HOST" => Some("localhost".to_string()),
            "DB_USER" => Some("resumer".to_string()),
            "DB_PASSWORD" => Some("secret".to_string()),
            "DB_NAME" => Some("resumer".to_string()),
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            _ => None,
        })
        .expect("test config is complete")
    }
}
