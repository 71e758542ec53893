use crate::config::{CaptureConfig, ProviderConfig};
use crate::providers::{AnthropicProvider, FallbackProvider, LlmProvider, OpenAIProvider};
use log::debug;
use std::error::Error;

/// Provider names accepted in `[providers.<name>]` and `fallback.order`,
/// with the environment variable that can supply each one's API key.
const KNOWN_PROVIDERS: &[(&str, &str)] = &[
    ("openai", "OPENAI_API_KEY"),
    ("anthropic", "ANTHROPIC_API_KEY"),
];

/// Turns configuration into ready-to-call providers.
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn known_providers() -> impl Iterator<Item = &'static str> {
        KNOWN_PROVIDERS.iter().map(|(name, _)| *name)
    }

    pub fn api_key_var(provider_name: &str) -> Option<&'static str> {
        KNOWN_PROVIDERS
            .iter()
            .find(|(name, _)| *name == provider_name)
            .map(|(_, var)| *var)
    }

    /// Construct `provider_name` from its settings.
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        if !config.enabled {
            return Err(format!("Provider '{}' is disabled", provider_name).into());
        }

        let provider: Box<dyn LlmProvider> = match provider_name {
            "openai" => Box::new(OpenAIProvider::new(config)?),
            "anthropic" => Box::new(AnthropicProvider::new(config)?),
            other => return Err(format!("Unknown provider: {}", other).into()),
        };

        debug!("Created {} provider (model {})", provider_name, config.model);
        Ok(provider)
    }

    /// Settings for `provider_name` if it should be used.
    ///
    /// A `[providers.<name>]` entry decides on its own through `enabled`.
    /// Without an entry, a known provider is used with its default model
    /// when its API key variable is set.
    pub fn configured(config: &CaptureConfig, provider_name: &str) -> Option<ProviderConfig> {
        Self::configured_with(config, provider_name, |var| std::env::var(var).ok())
    }

    fn configured_with<F>(
        config: &CaptureConfig,
        provider_name: &str,
        env: F,
    ) -> Option<ProviderConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        if config.providers.contains_key(provider_name) {
            return config.enabled_provider(provider_name).cloned();
        }

        let api_key = env(Self::api_key_var(provider_name)?)
            .filter(|key| !key.trim().is_empty())?;
        debug!(
            "Enabling {} from its API key environment variable",
            provider_name
        );
        Some(ProviderConfig {
            api_key: Some(api_key),
            ..ProviderConfig::for_provider(provider_name)
        })
    }

    /// The configured default provider.
    pub fn get_default_provider(
        config: &CaptureConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        let name = &config.default_provider;
        let settings = Self::configured(config, name)
            .ok_or_else(|| format!("Default provider '{}' is not configured", name))?;
        Self::create(name, &settings)
    }

    /// The provider selected by `config`: the fallback chain when enabled,
    /// otherwise the default provider. `None` when nothing is configured.
    pub fn from_config(
        config: &CaptureConfig,
    ) -> Result<Option<Box<dyn LlmProvider>>, Box<dyn Error + Send + Sync>> {
        if config.fallback.enabled {
            let chain = FallbackProvider::new(config)?;
            return Ok(Some(Box::new(chain)));
        }

        match Self::configured(config, &config.default_provider) {
            Some(settings) => Self::create(&config.default_provider, &settings).map(Some),
            None => Ok(None),
        }
    }
}
