use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "json")]
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Config(format!(
                "unsupported output format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Settings for the `job-inspect` tool. The library functions take none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputFormat,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let output = match lookup("JOB_INSPECT_OUTPUT") {
            Some(value) => value.parse()?,
            None => OutputFormat::default(),
        };

        let log_level = lookup("JOB_INSPECT_LOG_LEVEL")
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        Ok(Config { output, log_level })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_reads_output_and_log_level() {
        let config = Config::from_lookup(lookup_from(&[
            ("JOB_INSPECT_OUTPUT", "JSON"),
            ("JOB_INSPECT_LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_rejects_unknown_output() {
        let err = Config::from_lookup(lookup_from(&[("JOB_INSPECT_OUTPUT", "xml")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_blank_log_level_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("JOB_INSPECT_LOG_LEVEL", "  ")])).unwrap();
        assert_eq!(config.log_level, "info");
    }
}
