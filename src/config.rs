use crate::extractors::{KeywordTables, Placeholders, RecipeTextExtractor};
use crate::model::DEFAULT_IMAGE;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct CaptureConfig {
    /// Provider consulted when no fallback chain is configured
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Fallback configuration for automatic provider switching
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Timeout in seconds for page fetches and provider calls
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Image used when neither the caller nor the source supplies one
    #[serde(default = "default_image")]
    pub default_image: String,
    #[serde(default)]
    pub placeholders: Placeholders,
    #[serde(default)]
    pub keywords: KeywordTables,
}

/// Configuration for a specific external extraction provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4o-mini")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// An enabled configuration with the usual model for `provider_name`.
    pub fn for_provider(provider_name: &str) -> Self {
        let model = match provider_name {
            "anthropic" => "claude-3-5-haiku-latest",
            _ => "gpt-4o-mini",
        };

        Self {
            enabled: true,
            model: model.to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Configuration for provider fallback and retry behavior
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    /// Whether fallback is enabled
    #[serde(default)]
    pub enabled: bool,
    /// Order of providers to try (first to last)
    #[serde(default)]
    pub order: Vec<String>,
    /// Number of retry attempts per provider before fallback
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Initial delay between retries in milliseconds (grows with each attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            order: Vec::new(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            fallback: FallbackConfig::default(),
            timeout: default_timeout(),
            default_image: default_image(),
            placeholders: Placeholders::default(),
            keywords: KeywordTables::default(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_timeout() -> u64 {
    30
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

impl CaptureConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_CAPTURE__ prefix
    /// 2. recipe-capture.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_CAPTURE__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Build the text extraction engine described by this configuration.
    pub fn extractor(&self) -> RecipeTextExtractor {
        RecipeTextExtractor::new(self.keywords.clone(), self.placeholders.clone())
            .with_default_image(self.default_image.clone())
    }

    /// The configured provider if it exists and is enabled.
    pub fn enabled_provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name).filter(|p| p.enabled)
    }
}

/// Load configuration from file and environment variables
///
/// See [`CaptureConfig::load`] for the source priority.
pub fn load_config() -> Result<CaptureConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-capture").required(false))
        // Use double underscore for nested: RECIPE_CAPTURE__PROVIDERS__OPENAI__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_CAPTURE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "openai");
        assert_eq!(default_temperature(), 0.3);
        assert_eq!(default_max_tokens(), 2000);
        assert_eq!(default_retry_attempts(), 3);
        assert_eq!(default_retry_delay_ms(), 1000);
        assert_eq!(default_timeout(), 30);
    }

    #[test]
    fn test_fallback_config_default() {
        let fallback = FallbackConfig::default();
        assert!(!fallback.enabled);
        assert!(fallback.order.is_empty());
        assert_eq!(fallback.retry_attempts, 3);
        assert_eq!(fallback.retry_delay_ms, 1000);
    }

    #[test]
    fn test_empty_source_deserializes_to_defaults() {
        let config: CaptureConfig = Config::builder()
            .add_source(File::from_str("", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(config.providers.is_empty());
        assert_eq!(config.timeout, 30);
        assert_eq!(config.default_image, DEFAULT_IMAGE);
        assert_eq!(config.placeholders, Placeholders::default());
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            default_provider = "anthropic"
            timeout = 5

            [providers.anthropic]
            enabled = true
            model = "claude-3-5-haiku-latest"
            api_key = "test-key"

            [placeholders]
            ingredients = "Enter ingredients manually"

            [keywords]
            action_verbs = ["fry"]
        "#;

        let config: CaptureConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.default_provider, "anthropic");
        assert_eq!(config.timeout, 5);
        let provider = config.enabled_provider("anthropic").unwrap();
        assert_eq!(provider.temperature, 0.3);
        assert_eq!(provider.api_key.as_deref(), Some("test-key"));
        assert!(config.enabled_provider("openai").is_none());
        assert_eq!(config.placeholders.ingredients, "Enter ingredients manually");
        assert_eq!(config.placeholders.steps, "请手动输入步骤");
        assert_eq!(config.keywords.action_verbs, vec!["fry"]);
    }

    #[test]
    fn test_for_provider_models() {
        assert_eq!(ProviderConfig::for_provider("openai").model, "gpt-4o-mini");
        assert_eq!(
            ProviderConfig::for_provider("anthropic").model,
            "claude-3-5-haiku-latest"
        );
        assert!(ProviderConfig::for_provider("openai").enabled);
    }

    #[test]
    fn test_extractor_uses_configured_placeholders() {
        let config = CaptureConfig {
            placeholders: Placeholders::english(),
            default_image: "https://img/default.png".to_string(),
            ..Default::default()
        };

        let recipe = config.extractor().extract("nothing to see", None, None);
        assert_eq!(recipe.steps, vec!["Enter steps manually"]);
        assert_eq!(recipe.image, "https://img/default.png");
    }
}
