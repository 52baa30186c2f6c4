use anyhow::{bail, Context, Result};

use crate::letter::controller::{RevisionFeedback, RevisionPolicy, DEFAULT_MAX_DRAFTS};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Read once at startup; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional: requests may carry their own key.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on drafting invocations per run.
    pub max_drafts: u32,
    /// Feed the previous pass's unsupported sentences into redrafts.
    pub revision_feedback: bool,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let max_drafts = parse_or(&lookup, "LOR_MAX_DRAFTS", DEFAULT_MAX_DRAFTS)?;
        if max_drafts == 0 {
            bail!("LOR_MAX_DRAFTS must be at least 1");
        }

        Ok(Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_drafts,
            revision_feedback: parse_flag(&lookup, "LOR_REVISION_FEEDBACK")?,
            max_upload_bytes: parse_or(&lookup, "LOR_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }

    pub fn revision_policy(&self) -> RevisionPolicy {
        let feedback = if self.revision_feedback {
            RevisionFeedback::UnsupportedSentences
        } else {
            RevisionFeedback::None
        };
        RevisionPolicy::new(self.max_drafts, feedback)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool> {
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some(other) => bail!("{key} must be a boolean, got '{other}'"),
    }
}
