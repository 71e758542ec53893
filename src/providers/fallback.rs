use crate::config::CaptureConfig;
use crate::model::ExtractedRecipe;
use crate::providers::{LlmProvider, ProviderFactory};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;

/// Tries each configured provider in order, retrying each one with a
/// growing delay before moving on to the next.
pub struct FallbackProvider {
    providers: Vec<Box<dyn LlmProvider>>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl FallbackProvider {
    /// Create a new fallback provider from configuration
    pub fn new(config: &CaptureConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if !config.fallback.enabled {
            // If fallback is disabled, just use the default provider
            let default_provider = ProviderFactory::get_default_provider(config)?;
            return Ok(FallbackProvider {
                providers: vec![default_provider],
                retry_attempts: 1,
                retry_delay_ms: 0,
            });
        }

        let mut providers = Vec::new();

        // Create providers in fallback order
        for provider_name in &config.fallback.order {
            if let Some(provider_config) = ProviderFactory::configured(config, provider_name) {
                match ProviderFactory::create(provider_name, &provider_config) {
                    Ok(provider) => {
                        info!("Added '{}' to fallback chain", provider_name);
                        providers.push(provider);
                    }
                    Err(e) => {
                        warn!("Failed to initialize provider '{}': {}", provider_name, e);
                    }
                }
            } else {
                warn!(
                    "Provider '{}' in fallback order is not configured or disabled",
                    provider_name
                );
            }
        }

        Self::from_providers(
            providers,
            config.fallback.retry_attempts,
            config.fallback.retry_delay_ms,
        )
    }

    /// Build a chain from already constructed providers.
    pub fn from_providers(
        providers: Vec<Box<dyn LlmProvider>>,
        retry_attempts: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if providers.is_empty() {
            return Err("No providers available in fallback configuration".into());
        }

        Ok(FallbackProvider {
            providers,
            retry_attempts: retry_attempts.max(1),
            retry_delay_ms,
        })
    }

    /// Try a provider with increasing delay between attempts
    async fn try_provider_with_retry(
        &self,
        provider: &dyn LlmProvider,
        text: &str,
    ) -> Result<ExtractedRecipe, String> {
        let mut last_error = String::from("no attempts made");

        for attempt in 1..=self.retry_attempts {
            debug!(
                "Attempting extraction with {} (attempt {}/{})",
                provider.provider_name(),
                attempt,
                self.retry_attempts
            );

            match provider.extract(text).await {
                Ok(recipe) => {
                    info!(
                        "Successfully extracted recipe using {}",
                        provider.provider_name()
                    );
                    return Ok(recipe);
                }
                Err(e) => {
                    warn!(
                        "Provider {} failed (attempt {}/{}): {}",
                        provider.provider_name(),
                        attempt,
                        self.retry_attempts,
                        e
                    );
                    last_error = e.to_string();
                }
            }

            if attempt < self.retry_attempts {
                let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
                debug!("Waiting {:?} before retry", delay);
                sleep(delay).await;
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl LlmProvider for FallbackProvider {
    fn provider_name(&self) -> &str {
        "fallback"
    }

    async fn extract(&self, text: &str) -> Result<ExtractedRecipe, Box<dyn Error + Send + Sync>> {
        let mut all_errors: Vec<String> = Vec::new();

        for provider in &self.providers {
            match self.try_provider_with_retry(provider.as_ref(), text).await {
                Ok(recipe) => return Ok(recipe),
                Err(e) => {
                    all_errors.push(format!("{}: {}", provider.provider_name(), e));
                }
            }
        }

        Err(format!("All providers failed:\n{}", all_errors.join("\n")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FallbackConfig, ProviderConfig};
    use crate::model::{Cuisine, DEFAULT_IMAGE};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct FlakyProvider {
        name: &'static str,
        failures_before_success: u32,
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl LlmProvider for FlakyProvider {
        fn provider_name(&self) -> &str {
            self.name
        }

        async fn extract(
            &self,
            _text: &str,
        ) -> Result<ExtractedRecipe, Box<dyn Error + Send + Sync>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures_before_success {
                return Err(format!("{} unavailable", self.name).into());
            }
            Ok(ExtractedRecipe {
                title: self.name.to_string(),
                image: DEFAULT_IMAGE.to_string(),
                ingredients: vec!["egg".to_string()],
                steps: vec!["boil the egg".to_string()],
                cuisine: Cuisine::Western,
            })
        }
    }

    fn flaky(name: &'static str, failures: u32) -> (Box<dyn LlmProvider>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let provider = FlakyProvider {
            name,
            failures_before_success: failures,
            calls: calls.clone(),
        };
        (Box::new(provider), calls)
    }

    fn create_test_config_with_fallback() -> CaptureConfig {
        let mut providers = HashMap::new();
        providers.insert(
            "openai".to_string(),
            ProviderConfig {
                api_key: Some("test-key".to_string()),
                ..ProviderConfig::for_provider("openai")
            },
        );

        CaptureConfig {
            providers,
            fallback: FallbackConfig {
                enabled: true,
                order: vec!["openai".to_string()],
                retry_attempts: 3,
                retry_delay_ms: 100,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_fallback_provider_creation() {
        let config = create_test_config_with_fallback();
        let fallback = FallbackProvider::new(&config).unwrap();
        assert_eq!(fallback.provider_name(), "fallback");
        assert_eq!(fallback.providers.len(), 1);
    }

    #[test]
    fn test_fallback_disabled() {
        let mut config = create_test_config_with_fallback();
        config.fallback.enabled = false;

        let fallback = FallbackProvider::new(&config).unwrap();
        assert_eq!(fallback.providers.len(), 1);
        assert_eq!(fallback.retry_attempts, 1);
    }

    #[test]
    fn test_fallback_no_providers() {
        let mut config = CaptureConfig {
            fallback: FallbackConfig {
                enabled: true,
                order: vec!["openai".to_string(), "ollama".to_string()],
                retry_attempts: 3,
                retry_delay_ms: 100,
            },
            ..Default::default()
        };
        // An explicit entry keeps an OPENAI_API_KEY in the environment out of play.
        config.providers.insert(
            "openai".to_string(),
            ProviderConfig {
                enabled: false,
                ..ProviderConfig::for_provider("openai")
            },
        );

        let result = FallbackProvider::new(&config);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("No providers available"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_then_succeeds() {
        let (provider, calls) = flaky("first", 2);
        let fallback = FallbackProvider::from_providers(vec![provider], 3, 10).unwrap();

        let recipe = fallback.extract("text").await.unwrap();
        assert_eq!(recipe.title, "first");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_moves_to_next_provider() {
        let (first, first_calls) = flaky("first", u32::MAX);
        let (second, second_calls) = flaky("second", 0);
        let fallback = FallbackProvider::from_providers(vec![first, second], 2, 10).unwrap();

        let recipe = fallback.extract("text").await.unwrap();
        assert_eq!(recipe.title, "second");
        assert_eq!(first_calls.load(Ordering::SeqCst), 2);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_providers_fail() {
        let (first, _) = flaky("first", u32::MAX);
        let (second, _) = flaky("second", u32::MAX);
        let fallback = FallbackProvider::from_providers(vec![first, second], 1, 0).unwrap();

        let err = fallback.extract("text").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("All providers failed"));
        assert!(message.contains("first: first unavailable"));
        assert!(message.contains("second: second unavailable"));
    }
}
