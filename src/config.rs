use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use scangate_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN};

use crate::cli::args::Args;

const ENV_URL: &str = "LLM_GUARD_URL";
const ENV_TOKEN: &str = "LLM_GUARD_TOKEN";
const ENV_TIMEOUT_SECS: &str = "LLM_GUARD_TIMEOUT_SECS";
const ENV_PROMPT_SCANNERS: &str = "LLM_GUARD_PROMPT_SCANNERS";
const ENV_OUTPUT_SCANNERS: &str = "LLM_GUARD_OUTPUT_SCANNERS";

const MAX_TIMEOUT_SECS: u64 = 300;

/// Resolved configuration, built once at startup and passed down by reference.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ScangateConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub scanners: ScannersConfig,
}

/// Connection to the scanning service
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_token")]
    pub token: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_token() -> String {
    DEFAULT_TOKEN.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: default_token(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Scanner names requested for each scan kind
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ScannersConfig {
    #[serde(default = "default_prompt_scanners")]
    pub prompt: Vec<String>,

    #[serde(default = "default_output_scanners")]
    pub output: Vec<String>,
}

fn default_prompt_scanners() -> Vec<String> {
    vec!["PromptInjection".to_string(), "Toxicity".to_string()]
}

fn default_output_scanners() -> Vec<String> {
    vec!["Sensitive".to_string(), "Relevance".to_string()]
}

impl Default for ScannersConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt_scanners(),
            output: default_output_scanners(),
        }
    }
}

/// What a single config file actually sets. Keys absent from the file stay
/// `None` and leave the merged value alone.
#[derive(Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverlay {
    #[serde(default)]
    pub api: ApiOverlay,

    #[serde(default)]
    pub scanners: ScannersOverlay,
}

#[derive(Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ApiOverlay {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannersOverlay {
    pub prompt: Option<Vec<String>>,
    pub output: Option<Vec<String>>,
}

impl ConfigOverlay {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let overlay: ConfigOverlay = toml::from_str(&content)?;
        Ok(overlay)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    fn invalid(field: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl ScangateConfig {
    pub fn generate_default_config() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_else(|_| {
            r#"[api]
base_url = "http://localhost:9999"
token = "hello"
timeout_secs = 10

[scanners]
prompt = ["PromptInjection", "Toxicity"]
output = ["Sensitive", "Relevance"]
"#
            .to_string()
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ScangateConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the user config file path (~/.config/scangate/config.toml)
    pub fn get_user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/scangate/config.toml"))
    }

    /// Get the current directory config file path (./scangate.toml)
    pub fn get_current_config_path() -> PathBuf {
        PathBuf::from("./scangate.toml")
    }

    /// Load and merge configs with priority:
    /// 1. User config (~/.config/scangate/config.toml) - base
    /// 2. Current directory (./scangate.toml) - overrides user config
    ///
    /// Files that exist but fail to parse are reported as errors.
    pub fn load_with_merged_configs() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_path) = Self::get_user_config_path() {
            if user_path.exists() {
                config.merge(&ConfigOverlay::load_from_file(&user_path)?);
                tracing::debug!("Loaded user config from: {}", user_path.display());
            }
        }

        let current_path = Self::get_current_config_path();
        if current_path.exists() {
            config.merge(&ConfigOverlay::load_from_file(&current_path)?);
            tracing::debug!("Loaded current directory config from: {}", current_path.display());
        }

        Ok(config)
    }

    /// Apply every value the overlay sets, including ones equal to the default.
    pub fn merge(&mut self, overlay: &ConfigOverlay) {
        if let Some(base_url) = &overlay.api.base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(token) = &overlay.api.token {
            self.api.token = token.clone();
        }
        if let Some(timeout_secs) = overlay.api.timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }
        if let Some(prompt) = &overlay.scanners.prompt {
            self.scanners.prompt = prompt.clone();
        }
        if let Some(output) = &overlay.scanners.output {
            self.scanners.output = output.clone();
        }
    }

    pub fn apply_env_vars(&mut self, env_vars: &HashMap<String, String>) -> Result<(), ConfigError> {
        for (key, value) in env_vars {
            match key.as_str() {
                ENV_URL => self.api.base_url = value.clone(),
                ENV_TOKEN => self.api.token = value.clone(),
                ENV_TIMEOUT_SECS => {
                    self.api.timeout_secs = value
                        .parse()
                        .map_err(|_| ConfigError::invalid(ENV_TIMEOUT_SECS, value, "not an integer"))?;
                }
                ENV_PROMPT_SCANNERS => self.scanners.prompt = split_list(value),
                ENV_OUTPUT_SCANNERS => self.scanners.output = split_list(value),
                _ => {} // Ignore unrelated environment variables
            }
        }
        Ok(())
    }

    pub fn apply_cli_args(&mut self, args: &Args) {
        if let Some(base_url) = &args.api_base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(token) = &args.token {
            self.api.token = token.clone();
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.api.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "api.base_url",
                base_url,
                "must start with http:// or https://",
            ));
        }

        if self.api.timeout_secs == 0 || self.api.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::invalid(
                "api.timeout_secs",
                self.api.timeout_secs,
                "valid range: 1-300",
            ));
        }

        Ok(())
    }

    /// Resolve the final configuration.
    /// Precedence: defaults < config files < environment < CLI flags.
    pub fn load_with_precedence(
        config_path: Option<&Path>,
        env_vars: &HashMap<String, String>,
        args: &Args,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_with_merged_configs()?,
        };

        config.apply_env_vars(env_vars)?;
        config.apply_cli_args(args);
        config.validate()?;

        Ok(config)
    }

    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_base_url(self.api.base_url.clone())
            .with_token(self.api.token.clone())
            .with_timeout(self.api.timeout_secs)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ScangateConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:9999");
        assert_eq!(config.api.token, "hello");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.scanners.prompt, vec!["PromptInjection", "Toxicity"]);
        assert_eq!(config.scanners.output, vec!["Sensitive", "Relevance"]);
    }

    #[test]
    fn test_toml_parsing_with_partial_sections() {
        let toml_content = r#"
[api]
base_url = "https://guard.internal"

[scanners]
output = ["Sensitive"]
"#;

        let config: ScangateConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://guard.internal");
        assert_eq!(config.api.token, "hello");
        assert_eq!(config.scanners.prompt, vec!["PromptInjection", "Toxicity"]);
        assert_eq!(config.scanners.output, vec!["Sensitive"]);
    }

    #[test]
    fn test_generated_default_config_parses_back() {
        let generated = ScangateConfig::generate_default_config();
        let parsed: ScangateConfig = toml::from_str(&generated).unwrap();
        assert_eq!(parsed, ScangateConfig::default());
    }

    #[test]
    fn test_env_var_application() {
        let mut config = ScangateConfig::default();
        let mut env_vars = HashMap::new();
        env_vars.insert("LLM_GUARD_URL".to_string(), "http://guard:8000".to_string());
        env_vars.insert("LLM_GUARD_TOKEN".to_string(), "s3cret".to_string());
        env_vars.insert("LLM_GUARD_TIMEOUT_SECS".to_string(), "30".to_string());
        env_vars.insert(
            "LLM_GUARD_PROMPT_SCANNERS".to_string(),
            "PromptInjection, BanTopics,".to_string(),
        );
        env_vars.insert("PATH".to_string(), "/usr/bin".to_string());

        config.apply_env_vars(&env_vars).unwrap();

        assert_eq!(config.api.base_url, "http://guard:8000");
        assert_eq!(config.api.token, "s3cret");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.scanners.prompt, vec!["PromptInjection", "BanTopics"]);
        assert_eq!(config.scanners.output, vec!["Sensitive", "Relevance"]);
    }

    #[test]
    fn test_invalid_env_timeout() {
        let mut config = ScangateConfig::default();
        let env_vars = HashMap::from([(
            "LLM_GUARD_TIMEOUT_SECS".to_string(),
            "ten".to_string(),
        )]);

        let err = config.apply_env_vars(&env_vars).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_config_file_loading() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[api]
token = "from-file"
timeout_secs = 20
"#
        )
        .unwrap();

        let config = ScangateConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.token, "from-file");
        assert_eq!(config.api.timeout_secs, 20);
        assert_eq!(config.api.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_precedence_cli_over_env_over_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[api]
base_url = "http://file:1"
token = "file-token"
timeout_secs = 20
"#
        )
        .unwrap();

        let env_vars = HashMap::from([
            ("LLM_GUARD_URL".to_string(), "http://env:2".to_string()),
            ("LLM_GUARD_TOKEN".to_string(), "env-token".to_string()),
        ]);
        let args = Args::parse_from(["scangate", "--token", "cli-token"]);

        let config =
            ScangateConfig::load_with_precedence(Some(temp_file.path()), &env_vars, &args).unwrap();

        assert_eq!(config.api.base_url, "http://env:2");
        assert_eq!(config.api.token, "cli-token");
        assert_eq!(config.api.timeout_secs, 20);
    }

    #[test]
    fn test_merge_keeps_values_the_overlay_leaves_unset() {
        let mut config = ScangateConfig::default();
        let user: ConfigOverlay = toml::from_str(
            r#"
[api]
token = "user-token"
"#,
        )
        .unwrap();
        let current: ConfigOverlay = toml::from_str(
            r#"
[api]
base_url = "https://guard.example"
"#,
        )
        .unwrap();

        config.merge(&user);
        config.merge(&current);
        assert_eq!(config.api.token, "user-token");
        assert_eq!(config.api.base_url, "https://guard.example");
    }

    #[test]
    fn test_merge_can_reset_value_to_default() {
        let mut user_file = NamedTempFile::new().unwrap();
        writeln!(
            user_file,
            r#"
[api]
base_url = "https://user.example"
timeout_secs = 30

[scanners]
prompt = ["BanTopics"]
"#
        )
        .unwrap();
        let mut current_file = NamedTempFile::new().unwrap();
        writeln!(
            current_file,
            r#"
[api]
base_url = "http://localhost:9999"
timeout_secs = 10

[scanners]
prompt = ["PromptInjection", "Toxicity"]
"#
        )
        .unwrap();

        let mut config = ScangateConfig::default();
        config.merge(&ConfigOverlay::load_from_file(user_file.path()).unwrap());
        config.merge(&ConfigOverlay::load_from_file(current_file.path()).unwrap());

        assert_eq!(config.api.base_url, "http://localhost:9999");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.scanners.prompt, vec!["PromptInjection", "Toxicity"]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ScangateConfig::default();
        config.api.base_url = "localhost:9999".to_string();
        assert!(config.validate().is_err());

        let mut config = ScangateConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ScangateConfig::default();
        config.api.timeout_secs = 301;
        assert!(config.validate().is_err());

        assert!(ScangateConfig::default().validate().is_ok());
    }

    #[test]
    fn test_to_client_config() {
        let mut config = ScangateConfig::default();
        config.api.base_url = "http://guard:8000".to_string();
        config.api.timeout_secs = 5;

        let client_config = config.to_client_config();
        assert_eq!(client_config.base_url, "http://guard:8000");
        assert_eq!(client_config.token, "hello");
        assert_eq!(client_config.timeout_secs, 5);
    }

    #[test]
    fn test_debug_hides_token() {
        let mut config = ScangateConfig::default();
        config.api.token = "s3cret".to_string();
        assert!(!format!("{:?}", config).contains("s3cret"));
    }
}
