use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default except the mail relay, whose URL and token
/// must be given together.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub client_url: String,
    /// Directory holding the main resume file; LaTeX runs here.
    pub resume_dir: PathBuf,
    /// Directory holding the per-section `.tex` files.
    pub resume_sections_dir: PathBuf,
    pub resume_main: String,
    pub resume_download_name: String,
    pub latex_program: String,
    pub latex_timeout: Duration,
    pub mail_relay: Option<MailRelayConfig>,
    pub mail_from: String,
    pub contact_email: String,
    pub redis_url: Option<String>,
    pub trust_proxy: bool,
    /// Optional JSON file overriding the timeline description sentences.
    pub timeline_copy_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct MailRelayConfig {
    pub url: String,
    pub token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let resume_dir = PathBuf::from(env_or("RESUME_DIR", "../resume"));
        let resume_sections_dir = optional_env("RESUME_SECTIONS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| resume_dir.join("resume"));

        let mail_relay = match (optional_env("MAIL_RELAY_URL"), optional_env("MAIL_RELAY_TOKEN")) {
            (Some(url), Some(token)) => Some(MailRelayConfig { url, token }),
            (None, None) => None,
            _ => bail!("MAIL_RELAY_URL and MAIL_RELAY_TOKEN must be set together"),
        };
        let mail_from = env_or("MAIL_FROM", "portfolio@localhost");

        Ok(Config {
            port: env_or("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            client_url: env_or("CLIENT_URL", "http://localhost:3000"),
            resume_dir,
            resume_sections_dir,
            resume_main: env_or("RESUME_MAIN", "resume.tex"),
            resume_download_name: env_or("RESUME_DOWNLOAD_NAME", "Resume.pdf"),
            latex_program: env_or("LATEX_PROGRAM", "xelatex"),
            latex_timeout: Duration::from_secs(
                env_or("LATEX_TIMEOUT_SECS", "60")
                    .parse::<u64>()
                    .context("LATEX_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            mail_relay,
            contact_email: optional_env("CONTACT_EMAIL").unwrap_or_else(|| mail_from.clone()),
            mail_from,
            redis_url: optional_env("REDIS_URL"),
            trust_proxy: parse_bool(&env_or("TRUST_PROXY", "false"))
                .context("TRUST_PROXY must be true or false")?,
            timeline_copy_path: optional_env("TIMELINE_COPY_PATH").map(PathBuf::from),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean '{other}'"),
    }
}
