use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::extract::{ExtractContext, DEFAULT_PLACEHOLDERS};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraderConfig {
    /// Where grading calls are appended as JSON lines.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_log_responses")]
    pub log_responses: bool,
    #[serde(default = "default_max_logged_response_bytes")]
    pub max_logged_response_bytes: usize,
    #[serde(default = "default_placeholder_answers")]
    pub placeholder_answers: Vec<String>,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            log_responses: default_log_responses(),
            max_logged_response_bytes: default_max_logged_response_bytes(),
            placeholder_answers: default_placeholder_answers(),
        }
    }
}

impl GraderConfig {
    pub fn extract_context(&self) -> ExtractContext {
        ExtractContext {
            count_items: None,
            placeholders: self.placeholder_answers.clone(),
        }
    }
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

fn default_log_file() -> PathBuf {
    home_dir()
        .join(".local")
        .join("state")
        .join("answergrade")
        .join("grades.jsonl")
}

fn default_log_responses() -> bool {
    true
}

fn default_max_logged_response_bytes() -> usize {
    1024
}

fn default_placeholder_answers() -> Vec<String> {
    DEFAULT_PLACEHOLDERS.iter().map(|s| s.to_string()).collect()
}

/// Default config file path.
pub fn default_config_path() -> PathBuf {
    home_dir()
        .join(".config")
        .join("answergrade")
        .join("config.yaml")
}

/// Load config with fallback: explicit path > default path > built-in defaults.
///
/// An explicit path must exist and parse. A broken file at the default path is
/// reported and ignored.
pub fn load_config(explicit_path: Option<&Path>) -> Result<GraderConfig, String> {
    if let Some(path) = explicit_path {
        return load_config_from_path(path);
    }

    let default_path = default_config_path();
    if !default_path.exists() {
        return Ok(GraderConfig::default());
    }
    match load_config_from_path(&default_path) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!("answergrade: {e}; using defaults");
            Ok(GraderConfig::default())
        }
    }
}

fn load_config_from_path(path: &Path) -> Result<GraderConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&content).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(content: &str) -> Result<GraderConfig, serde_norway::Error> {
    if content.trim().is_empty() {
        return Ok(GraderConfig::default());
    }
    serde_norway::from_str(content)
}
