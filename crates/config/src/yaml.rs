//! YAML reading helpers
//!
//! Every document goes through `${VAR}` expansion before parsing and is
//! parsed into a `serde_json::Value`. An empty document reads as `{}`.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::ConfigError;

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]*)\}").expect("env var pattern is valid"));

/// Replace `${VAR}` references with environment values
///
/// Fails listing every variable that is not set.
pub fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let missing: Vec<String> = ENV_VAR_PATTERN
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .filter(|name| std::env::var(name).is_err())
        .collect();

    if !missing.is_empty() {
        return Err(ConfigError::Environment(format!(
            "Please make sure to set these environment variables: {}",
            missing.join(", ")
        )));
    }

    Ok(ENV_VAR_PATTERN
        .replace_all(content, |caps: &Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned())
}

/// Parse YAML text into a JSON value
pub fn parse_yaml_value(content: &str, origin: &str) -> Result<Value, ConfigError> {
    let expanded = expand_env_vars(content)?;
    if expanded.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_yaml::from_str(&expanded)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", origin, e)))?;

    Ok(match value {
        Value::Null => Value::Object(Map::new()),
        other => other,
    })
}

/// Whether the path has a YAML extension
pub fn is_yaml_file(path: impl AsRef<Path>) -> bool {
    matches!(
        path.as_ref().extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_empty_mapping() {
        assert_eq!(parse_yaml_value("", "empty").unwrap(), serde_json::json!({}));
        assert_eq!(parse_yaml_value("# only a comment\n", "comment").unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("DIALOGUE_DATA_TEST_LANGUAGE", "de");
        let value = parse_yaml_value("language: ${DIALOGUE_DATA_TEST_LANGUAGE}", "inline").unwrap();
        assert_eq!(value["language"], "de");
    }

    #[test]
    fn test_missing_env_var_fails() {
        let err = expand_env_vars("token: ${DIALOGUE_DATA_TEST_SURELY_UNSET}").unwrap_err();
        assert!(matches!(err, ConfigError::Environment(msg) if msg.contains("DIALOGUE_DATA_TEST_SURELY_UNSET")));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse_yaml_value("key: [unclosed", "broken.yml").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(msg) if msg.starts_with("broken.yml")));
    }

    #[test]
    fn test_is_yaml_file() {
        assert!(is_yaml_file("data/nlu.yml"));
        assert!(is_yaml_file("domain.yaml"));
        assert!(!is_yaml_file("data/nlu.md"));
    }
}
