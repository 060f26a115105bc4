use std::collections::BTreeSet;
use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::s3_keys;

pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["txt", "pdf", "docx", "doc"];

/// Routing and invocation settings for one deployment of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub source_prefix: String,
    pub destination_prefix: String,
    pub summary_marker: String,
    /// Lowercase extensions without the leading dot.
    pub allowed_extensions: BTreeSet<String>,
    /// `None` sends the whole document to the model.
    pub max_prompt_chars: Option<usize>,
    pub model_id: String,
    pub max_output_tokens: u32,
    pub max_attempts: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_prefix: s3_keys::DEFAULT_SOURCE_PREFIX.to_string(),
            destination_prefix: s3_keys::DEFAULT_DESTINATION_PREFIX.to_string(),
            summary_marker: s3_keys::DEFAULT_SUMMARY_MARKER.to_string(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_prompt_chars: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PipelineConfig {
    /// Read the configuration from `DOCSUM_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup. Unset or
    /// blank variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let allowed_extensions = match get("DOCSUM_ALLOWED_EXTENSIONS") {
            Some(raw) => parse_extensions(&raw),
            None => defaults.allowed_extensions,
        };

        let max_prompt_chars = get("DOCSUM_MAX_PROMPT_CHARS")
            .map(|raw| parse_number::<usize>("DOCSUM_MAX_PROMPT_CHARS", &raw))
            .transpose()?;
        if max_prompt_chars == Some(0) {
            return Err(ConfigError::InvalidValue {
                name: "DOCSUM_MAX_PROMPT_CHARS",
                value: "0".to_string(),
                reason: "must be positive; unset it to disable truncation".to_string(),
            });
        }

        let max_attempts = get("DOCSUM_MAX_ATTEMPTS")
            .map(|raw| parse_number::<u32>("DOCSUM_MAX_ATTEMPTS", &raw))
            .transpose()?
            .unwrap_or(defaults.max_attempts);
        if max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                name: "DOCSUM_MAX_ATTEMPTS",
                value: "0".to_string(),
                reason: "at least one attempt is required".to_string(),
            });
        }

        Ok(Self {
            source_prefix: get("DOCSUM_SOURCE_PREFIX").unwrap_or(defaults.source_prefix),
            destination_prefix: get("DOCSUM_DESTINATION_PREFIX")
                .unwrap_or(defaults.destination_prefix),
            summary_marker: get("DOCSUM_SUMMARY_MARKER").unwrap_or(defaults.summary_marker),
            allowed_extensions,
            max_prompt_chars,
            model_id: get("DOCSUM_MODEL_ID").unwrap_or(defaults.model_id),
            max_output_tokens: get("DOCSUM_MAX_OUTPUT_TOKENS")
                .map(|raw| parse_number::<u32>("DOCSUM_MAX_OUTPUT_TOKENS", &raw))
                .transpose()?
                .unwrap_or(defaults.max_output_tokens),
            max_attempts,
        })
    }

    pub fn allows_extension(&self, ext: &str) -> bool {
        self.allowed_extensions.contains(&ext.to_lowercase())
    }
}

fn parse_extensions(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn parse_number<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Keep at most `limit` characters from the start of `text`.
pub fn truncate_chars(text: &str, limit: Option<usize>) -> &str {
    match limit.and_then(|n| text.char_indices().nth(n)) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
