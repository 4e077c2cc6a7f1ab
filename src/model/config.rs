use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "FAILSENSE_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_API_KEY: &str = "GROQ_API_KEY";
const ENV_BASE_URL: &str = "GROQ_BASE_URL";
const ENV_MODEL: &str = "LLM_MODEL";
const ENV_TIMEOUT_SECS: &str = "LLM_TIMEOUT_SECS";
const ENV_PORT: &str = "PORT";
const ENV_HOST: &str = "HOST";
const ENV_MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOST: &str = "0.0.0.0";

/// Request body cap for `POST /api/analyze`. CI logs routinely exceed
/// actix's 2 MiB JSON default.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Completion service settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Credential for the completion service. Only ever read from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Cross-origin settings for the browser UI
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub max_body_bytes: Option<usize>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub cors: CorsConfig,
    pub port: u16,
    pub host: String,
    /// Largest accepted JSON request body, in bytes
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            cors: CorsConfig::default(),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path);

        Self::from_sources(|key| std::env::var(key).ok(), file)
    }

    /// Merge a config file with variables resolved by `lookup`.
    ///
    /// Variables win over the file. Unparsable numeric values fall back to
    /// whatever the file (or the default) provides.
    pub fn from_sources<F>(lookup: F, file: Option<ConfigFile>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ConfigFile {
            mut llm,
            cors,
            max_body_bytes,
        } = file.unwrap_or_default();

        llm.api_key = lookup(ENV_API_KEY).filter(|key| !key.trim().is_empty());

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            llm.base_url = base_url;
        }
        if let Some(model) = lookup(ENV_MODEL) {
            llm.model = model;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS).and_then(|t| t.parse().ok()) {
            llm.timeout_secs = timeout;
        }

        let port = lookup(ENV_PORT)
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let max_body_bytes = lookup(ENV_MAX_BODY_BYTES)
            .and_then(|b| b.parse().ok())
            .or(max_body_bytes)
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Self {
            llm,
            cors,
            port,
            host,
            max_body_bytes,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_config_file(&contents, path),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config_file(contents: &str, path: &Path) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str(contents) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded configuration from file");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_sources(lookup_from(&[]), None);

        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.max_body_bytes, 16 * 1024 * 1024);
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::from_sources(
            lookup_from(&[
                ("GROQ_API_KEY", "gsk_test"),
                ("PORT", "9090"),
                ("HOST", "127.0.0.1"),
                ("LLM_MODEL", "llama-3.1-8b-instant"),
                ("LLM_TIMEOUT_SECS", "15"),
            ]),
            None,
        );

        assert_eq!(config.llm.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.llm.timeout_secs, 15);
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let config = Config::from_sources(lookup_from(&[("PORT", "not-a-port")]), None);
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_max_body_bytes_from_file_and_environment() {
        let file = Config::parse_config_file("max_body_bytes: 1048576", Path::new("config.yaml"));
        let from_file = Config::from_sources(lookup_from(&[]), file.clone());
        assert_eq!(from_file.max_body_bytes, 1_048_576);

        let from_env = Config::from_sources(lookup_from(&[("MAX_BODY_BYTES", "4096")]), file);
        assert_eq!(from_env.max_body_bytes, 4096);
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = Config::from_sources(lookup_from(&[("GROQ_API_KEY", "   ")]), None);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_config_file_is_merged_under_environment() {
        let yaml = r#"
llm:
  model: mixtral-8x7b
  timeout_secs: 30
  api_key: ignored
cors:
  allowed_origins:
    - https://failsense.example.com
"#;
        let file = Config::parse_config_file(yaml, Path::new("config.yaml"));
        assert!(file.is_some());

        let config = Config::from_sources(lookup_from(&[("LLM_TIMEOUT_SECS", "5")]), file);

        assert_eq!(config.llm.model, "mixtral-8x7b");
        assert_eq!(config.llm.timeout_secs, 5);
        assert_eq!(config.llm.max_tokens, 2048);
        assert!(config.llm.api_key.is_none());
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://failsense.example.com"]
        );
    }

    #[test]
    fn test_empty_and_invalid_config_files() {
        let empty = Config::parse_config_file("  \n", Path::new("config.yaml"));
        assert!(empty.is_some());

        let invalid = Config::parse_config_file("llm: [unclosed", Path::new("config.yaml"));
        assert!(invalid.is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::from_sources(lookup_from(&[("GROQ_API_KEY", "gsk_secret")]), None);
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("gsk_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
