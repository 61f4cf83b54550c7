//! YAML configuration.
//!
//! Every field has a default, so an absent file and an empty file behave the
//! same. Values are validated once at load time; afterwards durations are
//! read through the typed accessors.

use crate::error::ConfigError;
use crate::scrapers::article::HtmlSanitizer;
use crate::text::morphology::MorphologyKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Word list of negatively charged terms, one or more per line.
    pub negative_words_path: PathBuf,
    /// Word list of positively charged terms.
    pub positive_words_path: PathBuf,
    /// Budget for tokenizing a single article.
    pub tokenize_timeout_secs: f64,
    /// Client-side timeout for a single page download.
    pub fetch_timeout_secs: f64,
    pub user_agent: String,
    /// CSS selectors locating the article body, tried in order.
    pub article_selectors: Vec<String>,
    pub morphology: MorphologyKind,
    /// Upper bound on URLs accepted by one HTTP request.
    pub max_urls_per_request: usize,
    /// Deadline for a whole HTTP request; unset means no deadline.
    pub request_timeout_secs: Option<f64>,
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            negative_words_path: PathBuf::from("charged_dict/negative_words.txt"),
            positive_words_path: PathBuf::from("charged_dict/positive_words.txt"),
            tokenize_timeout_secs: 3.0,
            fetch_timeout_secs: 10.0,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            article_selectors: vec!["article".to_string()],
            morphology: MorphologyKind::default(),
            max_urls_per_request: 10,
            request_timeout_secs: None,
            bind_addr: "127.0.0.1:8000".to_string(),
        }
    }
}

fn seconds(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|e| ConfigError::Invalid {
        field,
        reason: format!("{value} is not a valid number of seconds: {e}"),
    })
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        seconds("tokenize_timeout_secs", self.tokenize_timeout_secs)?;
        seconds("fetch_timeout_secs", self.fetch_timeout_secs)?;
        if let Some(limit) = self.request_timeout_secs {
            seconds("request_timeout_secs", limit)?;
        }
        HtmlSanitizer::new(&self.article_selectors)?;
        if self.max_urls_per_request == 0 {
            return Err(ConfigError::Invalid {
                field: "max_urls_per_request",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn tokenize_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.tokenize_timeout_secs).unwrap_or_default()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.fetch_timeout_secs).unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

/// Parse and validate a YAML config document.
pub fn parse_config(path: &str, yaml: &str) -> Result<AppConfig, ConfigError> {
    // serde_yaml rejects an empty document for a struct
    let config: AppConfig = if yaml.trim().is_empty() {
        AppConfig::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?
    };
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path`, or the defaults when no path is given.
#[instrument(level = "info")]
pub async fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let Some(path) = path else {
        info!("No config file given; using defaults");
        return Ok(AppConfig::default());
    };
    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
    let config = parse_config(path, &yaml)?;
    info!(path, "Loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.tokenize_timeout(), Duration::from_secs(3));
        assert_eq!(config.max_urls_per_request, 10);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.morphology, MorphologyKind::Russian);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
tokenize_timeout_secs: 0.5
morphology: english
article_selectors:
  - "article.article"
  - "main"
"#;
        let config = parse_config("inline", yaml).unwrap();
        assert_eq!(config.tokenize_timeout(), Duration::from_millis(500));
        assert_eq!(config.morphology, MorphologyKind::English);
        assert_eq!(config.article_selectors, vec!["article.article", "main"]);
        assert_eq!(config.bind_addr, "127.0.0.1:8000");
    }

    #[test]
    fn test_example_config_parses() {
        let yaml = include_str!("../config.example.yaml");
        let config = parse_config("config.example.yaml", yaml).unwrap();
        assert_eq!(config.tokenize_timeout(), Duration::from_secs(3));
        assert_eq!(config.morphology, MorphologyKind::Russian);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = parse_config("inline", "").unwrap();
        assert_eq!(config.max_urls_per_request, 10);
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let err = parse_config("inline", "tokenize_timeout_secs: -1").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "tokenize_timeout_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_url_limit_rejected() {
        let err = parse_config("inline", "max_urls_per_request: 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "max_urls_per_request",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_selector_rejected() {
        let err = parse_config("inline", "article_selectors: [\"div[[\"]").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "article_selectors",
                ..
            }
        ));
        assert!(parse_config("inline", "article_selectors: []").is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_config("inline", "tokenise_timeout: 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs: 20\nbind_addr: \"0.0.0.0:9000\"").unwrap();
        let path = file.path().to_str().unwrap();

        let config = load_config(Some(path)).await.unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        let err = load_config(Some("/nonexistent/config.yaml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn test_load_config_without_path() {
        let config = load_config(None).await.unwrap();
        assert_eq!(config.article_selectors, vec!["article"]);
    }
}
